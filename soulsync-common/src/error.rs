//! Shared error type
//!
//! Covers the failures the common crate itself can produce: database access,
//! filesystem work during root-folder/database setup, and configuration
//! resolution. Request-level errors (bad input, missing resources) belong to
//! the API crate's `ApiError`, which wraps this type for anything that
//! bubbles up from storage.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// SQLite query or pool failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem failure while creating the root folder or database file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file missing, unreadable, or platform directories unavailable
    #[error("configuration error: {0}")]
    Config(String),
}
