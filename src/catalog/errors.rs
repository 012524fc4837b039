//! Catalog errors

use thiserror::Error;

use crate::db::DbError;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Metadata could not be read from the database
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for CatalogError {
    fn from(e: rusqlite::Error) -> Self {
        CatalogError::Unavailable(e.to_string())
    }
}

impl From<DbError> for CatalogError {
    fn from(e: DbError) -> Self {
        CatalogError::Unavailable(e.to_string())
    }
}
