//! Unified error for facade operations

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::db::DbError;
use crate::executor::ExecError;
use crate::query::QueryError;

pub type FacadeResult<T> = Result<T, FacadeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacadeError {
    /// Dynamic query rejected or catalog failure during validation
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Schema lookup for a table with no columns
    #[error("Table '{0}' not found or no schema available.")]
    SchemaNotFound(String),

    /// Raw SQL request without statement text
    #[error("'query' field is required in the request body.")]
    MissingQuery,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Execution(ExecError),

    /// No session could be acquired
    #[error(transparent)]
    Unavailable(#[from] DbError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ExecError> for FacadeError {
    fn from(e: ExecError) -> Self {
        match e {
            ExecError::EmptyStatement => FacadeError::MissingQuery,
            other => FacadeError::Execution(other),
        }
    }
}

impl FacadeError {
    /// Whether the caller can fix the request and retry
    pub fn is_client_error(&self) -> bool {
        match self {
            FacadeError::Query(e) => e.is_validation(),
            FacadeError::SchemaNotFound(_) | FacadeError::MissingQuery => true,
            _ => false,
        }
    }
}
