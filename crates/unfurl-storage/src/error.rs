//! Storage error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded for key: {0}")]
    QuotaExceeded(String),
}
