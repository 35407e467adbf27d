//! Inbox view state.
//!
//! The inbox keeps the emails a list screen currently shows together with
//! the active search query. It holds no state shared with anyone else: every
//! mutation goes through the store and is followed by a re-read, so the
//! cached view never drifts from what is persisted.

use tracing::debug;

use crate::Result;
use crate::email::{CaseSensitivity, Email, EmailId, EmailStore, NewEmail};

/// Owned cache of the visible emails and the query that produced them.
#[derive(Debug, Clone)]
pub struct Inbox {
    store: EmailStore,
    query: String,
    case: CaseSensitivity,
    emails: Vec<Email>,
}

impl Inbox {
    /// Creates an empty inbox over `store`. Call [`Inbox::load`] to fill it.
    #[must_use]
    pub const fn new(store: EmailStore) -> Self {
        Self {
            store,
            query: String::new(),
            case: CaseSensitivity::Sensitive,
            emails: Vec::new(),
        }
    }

    /// Uses `case` for every subsequent search.
    #[must_use]
    pub fn with_case_sensitivity(mut self, case: CaseSensitivity) -> Self {
        self.case = case;
        self
    }

    /// Clears the query and shows every stored email.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails. The cached view is left
    /// unchanged in that case.
    pub async fn load(&mut self) -> Result<()> {
        self.emails = self.store.list().await?;
        self.query.clear();
        Ok(())
    }

    /// Sets the search query without running it.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Runs the current query against the store and replaces the view.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn search(&mut self) -> Result<()> {
        self.emails = self.store.search_with(&self.query, self.case).await?;
        debug!(
            "Inbox shows {} email(s) for query {:?}",
            self.emails.len(),
            self.query
        );
        Ok(())
    }

    /// Stores a composed email and refreshes the view.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or the refresh fails.
    pub async fn compose(&mut self, email: &NewEmail) -> Result<EmailId> {
        let id = self.store.insert(email).await?;
        self.search().await?;
        Ok(id)
    }

    /// Reads one email through the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn open(&self, id: EmailId) -> Result<Option<Email>> {
        self.store.get(id).await
    }

    /// Deletes an email and re-runs the current query.
    ///
    /// Returns whether the email still existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete or the refresh fails.
    pub async fn delete(&mut self, id: EmailId) -> Result<bool> {
        let removed = self.store.delete(id).await?;
        self.search().await?;
        Ok(removed)
    }

    /// Emails currently shown.
    #[must_use]
    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    /// Number of emails currently shown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Whether nothing is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// The store this inbox reads through.
    #[must_use]
    pub const fn store(&self) -> &EmailStore {
        &self.store
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn inbox() -> Inbox {
        let store = EmailStore::in_memory().await.unwrap();
        store
            .insert(&NewEmail::new("alice@x.com", "Hi", "body1"))
            .await
            .unwrap();
        store
            .insert(&NewEmail::new("bob@x.com", "Meeting", "body2"))
            .await
            .unwrap();
        Inbox::new(store)
    }

    #[tokio::test]
    async fn test_new_inbox_is_empty_until_loaded() {
        let mut inbox = inbox().await;
        assert!(inbox.is_empty());

        inbox.load().await.unwrap();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox.query(), "");
    }

    #[tokio::test]
    async fn test_search_filters_view() {
        let mut inbox = inbox().await;
        inbox.set_query("Meeting");
        inbox.search().await.unwrap();

        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox.emails()[0].sender, "bob@x.com");
    }

    #[tokio::test]
    async fn test_load_clears_query() {
        let mut inbox = inbox().await;
        inbox.set_query("alice");
        inbox.search().await.unwrap();
        assert_eq!(inbox.len(), 1);

        inbox.load().await.unwrap();
        assert_eq!(inbox.query(), "");
        assert_eq!(inbox.len(), 2);
    }

    #[tokio::test]
    async fn test_compose_refreshes_with_active_query() {
        let mut inbox = inbox().await;
        inbox.set_query("Meeting");
        inbox.search().await.unwrap();

        let id = inbox
            .compose(&NewEmail::new("carol@x.com", "Meeting notes", "body3"))
            .await
            .unwrap();
        assert_eq!(inbox.len(), 2);
        assert!(inbox.emails().iter().any(|email| email.id == id));

        inbox
            .compose(&NewEmail::new("dave@x.com", "Lunch", "body4"))
            .await
            .unwrap();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox.store().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_delete_refreshes_view() {
        let mut inbox = inbox().await;
        inbox.load().await.unwrap();
        let first = inbox.emails()[0].id;

        assert!(inbox.delete(first).await.unwrap());
        assert_eq!(inbox.len(), 1);
        assert!(inbox.open(first).await.unwrap().is_none());

        assert!(!inbox.delete(first).await.unwrap());
        assert_eq!(inbox.len(), 1);
    }

    #[tokio::test]
    async fn test_view_sees_writes_from_other_handles() {
        let mut inbox = inbox().await;
        inbox.load().await.unwrap();

        let other = inbox.store().clone();
        other
            .insert(&NewEmail::new("erin@x.com", "Hi again", "body5"))
            .await
            .unwrap();
        assert_eq!(inbox.len(), 2);

        inbox.search().await.unwrap();
        assert_eq!(inbox.len(), 3);
    }

    #[tokio::test]
    async fn test_case_insensitive_inbox() {
        let store = inbox().await.store().clone();
        let mut inbox = Inbox::new(store).with_case_sensitivity(CaseSensitivity::AsciiInsensitive);

        inbox.set_query("MEETING");
        inbox.search().await.unwrap();
        assert_eq!(inbox.len(), 1);
    }

    #[tokio::test]
    async fn test_open_reads_through_store() {
        let inbox = inbox().await;
        let email = inbox.open(EmailId::new(2)).await.unwrap().unwrap();
        assert_eq!(email.subject, "Meeting");
        assert!(inbox.open(EmailId::new(9)).await.unwrap().is_none());
    }
}
