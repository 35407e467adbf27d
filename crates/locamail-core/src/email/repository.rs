//! Email storage repository.

use std::path::Path;
use std::time::Duration;

use sqlx::Row;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use tracing::debug;

use super::model::{CaseSensitivity, Email, EmailId, NewEmail};
use crate::Result;

/// Repository owning the `emails` table.
///
/// Cloning is cheap: clones share the same connection pool, so one store is
/// opened at startup and handed to every consumer.
#[derive(Debug, Clone)]
pub struct EmailStore {
    pool: SqlitePool,
}

impl EmailStore {
    /// Open the store backed by the file at `database_path`.
    ///
    /// Creates the file, its parent directories and the table if they don't
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the database
    /// connection fails or schema creation fails.
    pub async fn new(database_path: impl AsRef<Path>) -> Result<Self> {
        let path = database_path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        debug!("Opened email store at {}", path.display());

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        // A single connection that never idles out: each new connection to
        // `sqlite::memory:` would see an empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS emails (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sender TEXT NOT NULL,
                subject TEXT NOT NULL,
                content TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get all emails in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<Email>> {
        let rows = sqlx::query(
            r"
            SELECT id, sender, subject, content
            FROM emails
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows_to_emails(&rows)
    }

    /// Store a new email and return the identifier assigned to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn insert(&self, email: &NewEmail) -> Result<EmailId> {
        let result = sqlx::query(
            r"
            INSERT INTO emails (sender, subject, content)
            VALUES (?, ?, ?)
            ",
        )
        .bind(&email.sender)
        .bind(&email.subject)
        .bind(&email.content)
        .execute(&self.pool)
        .await?;

        let id = EmailId::new(result.last_insert_rowid());
        debug!("Stored email {id} from {}", email.sender);
        Ok(id)
    }

    /// Get email by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails. A missing email is
    /// `Ok(None)`.
    pub async fn get(&self, id: EmailId) -> Result<Option<Email>> {
        let row = sqlx::query(
            r"
            SELECT id, sender, subject, content
            FROM emails
            WHERE id = ?
            ",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_email).transpose()
    }

    /// Delete an email.
    ///
    /// Returns `true` if a row was removed and `false` if no email had this
    /// ID. Deleting twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, id: EmailId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM emails WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            debug!("Deleted email {id}");
        } else {
            debug!("Email {id} already gone, nothing deleted");
        }
        Ok(removed)
    }

    /// Delete the stored copy of `email`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete_email(&self, email: &Email) -> Result<bool> {
        self.delete(email.id).await
    }

    /// Search emails whose sender or subject contains `query`.
    ///
    /// Matching is case-sensitive. An empty query returns every email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Email>> {
        self.search_with(query, CaseSensitivity::Sensitive).await
    }

    /// Search emails whose sender or subject contains `query`, using the
    /// given case handling.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn search_with(&self, query: &str, case: CaseSensitivity) -> Result<Vec<Email>> {
        if query.is_empty() {
            return self.list().await;
        }

        // SQLite's lower() folds ASCII only, which is what AsciiInsensitive promises.
        let sql = match case {
            CaseSensitivity::Sensitive => {
                r"
                SELECT id, sender, subject, content
                FROM emails
                WHERE instr(sender, ?1) > 0 OR instr(subject, ?1) > 0
                ORDER BY id ASC
                "
            }
            CaseSensitivity::AsciiInsensitive => {
                r"
                SELECT id, sender, subject, content
                FROM emails
                WHERE instr(lower(sender), lower(?1)) > 0
                   OR instr(lower(subject), lower(?1)) > 0
                ORDER BY id ASC
                "
            }
        };

        let rows = sqlx::query(sql).bind(query).fetch_all(&self.pool).await?;

        rows_to_emails(&rows)
    }

    /// Count stored emails.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM emails")
            .fetch_one(&self.pool)
            .await?;

        let total: i64 = row.try_get("total")?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}

fn row_to_email(row: &SqliteRow) -> Result<Email> {
    Ok(Email {
        id: EmailId::new(row.try_get("id")?),
        sender: row.try_get("sender")?,
        subject: row.try_get("subject")?,
        content: row.try_get("content")?,
    })
}

fn rows_to_emails(rows: &[SqliteRow]) -> Result<Vec<Email>> {
    rows.iter().map(row_to_email).collect()
}
