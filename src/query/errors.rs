//! # Query Validation Errors

use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type for query construction
pub type QueryResult<T> = Result<T, QueryError>;

/// Reasons a request is rejected before any statement is produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Table absent from the catalog, or without columns
    #[error("Table '{0}' not found.")]
    TableNotFound(String),

    /// Projection names not in the schema (all offenders, request order)
    #[error("Invalid column(s) requested: {}", quoted_list(.0))]
    InvalidColumn(Vec<String>),

    /// Filter key that matches no column
    #[error("Invalid filter column: {0}")]
    InvalidFilterColumn(String),

    #[error("Invalid order_by parameter: {0}")]
    InvalidOrderBy(String),

    #[error("Invalid limit parameter. Must be an integer >= 1.")]
    InvalidLimit(String),

    #[error("Invalid offset parameter. Must be an integer >= 0.")]
    InvalidOffset(String),

    /// Metadata could not be read
    #[error("{0}")]
    Catalog(#[from] CatalogError),
}

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{}'", n))
        .collect::<Vec<_>>()
        .join(", ")
}

impl QueryError {
    /// Validation failures the caller can fix by changing the request
    pub fn is_validation(&self) -> bool {
        !matches!(self, QueryError::Catalog(_))
    }
}
