//! Email storage module.
//!
//! Provides the email model and the SQLite-backed store.

mod model;
mod repository;

pub use model::{CaseSensitivity, Email, EmailId, NewEmail};
pub use repository::EmailStore;
