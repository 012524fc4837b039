//! # Query Builder
//!
//! Entry point combining validation and compilation.

use super::errors::QueryResult;
use super::params::RawParams;
use super::spec::QuerySpec;
use super::statement::BuiltStatement;
use crate::catalog::Catalog;

/// Compiles requests against a catalog
pub struct QueryBuilder<'c, C: Catalog + ?Sized> {
    catalog: &'c C,
}

impl<'c, C: Catalog + ?Sized> QueryBuilder<'c, C> {
    pub fn new(catalog: &'c C) -> Self {
        Self { catalog }
    }

    /// Validate `params` for `table` and compile the statement.
    ///
    /// No statement is produced unless every check passes.
    pub fn build(&self, table: &str, params: &RawParams) -> QueryResult<BuiltStatement> {
        let spec = QuerySpec::validate(self.catalog, table, params).map_err(|e| {
            tracing::debug!(table, error = %e, "query rejected");
            e
        })?;

        let statement = spec.compile();
        tracing::debug!(
            table,
            sql = statement.sql(),
            params = statement.params().len(),
            "query compiled"
        );

        Ok(statement)
    }
}
