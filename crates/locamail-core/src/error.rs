//! Error types for the core library.

use thiserror::Error;

/// Storage failures surfaced by the email store.
///
/// Absence is never an error: lookups return `Option` and deletes report
/// whether a row was removed.
#[derive(Debug, Error)]
pub enum Error {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O error while preparing the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
