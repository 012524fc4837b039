//! Connection provider errors

use thiserror::Error;

/// Result type for connection acquisition
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised while opening or acquiring connections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    /// The database could not be opened
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// The provider was closed before acquisition
    #[error("Connection provider is closed")]
    Closed,
}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        DbError::Unavailable(e.to_string())
    }
}
