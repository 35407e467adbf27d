//! # locamail-core
//!
//! Local email storage for the Locaweb mail demo.
//!
//! This crate provides:
//! - The email model (`Email`, `EmailId`, `NewEmail`)
//! - **Email Store** - the `SQLite` `emails` table with list, insert,
//!   get, delete and substring search
//! - **Inbox** - an owned cache of the emails a list screen shows, refreshed
//!   through the store after every change
//!
//! ## Example
//!
//! ```ignore
//! use locamail_core::{EmailStore, NewEmail};
//!
//! let store = EmailStore::new("locamail.db").await?;
//! let id = store.insert(&NewEmail::new("alice@x.com", "Hi", "body")).await?;
//! assert!(store.get(id).await?.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod email;
mod error;
pub mod inbox;

pub use email::{CaseSensitivity, Email, EmailId, EmailStore, NewEmail};
pub use error::{Error, Result};
pub use inbox::Inbox;
