//! Database facade over a connection provider

use std::sync::Arc;

use super::errors::{FacadeError, FacadeResult};
use crate::catalog::{Catalog, ColumnSchema, SqliteCatalog};
use crate::db::ConnectionProvider;
use crate::executor::{ExecOutcome, Executor, Row};
use crate::query::{QueryBuilder, RawParams};

/// Entry point for table listing, schema lookup, dynamic and raw queries
#[derive(Debug, Clone)]
pub struct DatabaseFacade {
    provider: Arc<ConnectionProvider>,
}

impl DatabaseFacade {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }

    /// All table names
    pub fn list_tables(&self) -> FacadeResult<Vec<String>> {
        let session = self.provider.acquire()?;
        Ok(SqliteCatalog::new(&session).list_tables()?)
    }

    /// Column schema of `table`; a table without columns is not found.
    ///
    /// The name must match a listed table exactly, the same rule the query
    /// builder applies.
    pub fn table_schema(&self, table: &str) -> FacadeResult<ColumnSchema> {
        let session = self.provider.acquire()?;
        let catalog = SqliteCatalog::new(&session);

        if !catalog.list_tables()?.iter().any(|t| t == table) {
            return Err(FacadeError::SchemaNotFound(table.to_string()));
        }

        let schema = catalog.get_schema(table)?;
        if schema.is_empty() {
            return Err(FacadeError::SchemaNotFound(table.to_string()));
        }
        Ok(schema)
    }

    /// Validate, compile and run a dynamic query
    pub fn query_table(&self, table: &str, params: &RawParams) -> FacadeResult<Vec<Row>> {
        let session = self.provider.acquire()?;
        let catalog = SqliteCatalog::new(&session);

        let statement = QueryBuilder::new(&catalog).build(table, params)?;
        let outcome = Executor::new(&session).execute(&statement)?;

        Ok(outcome.into_rows())
    }

    /// Run caller SQL verbatim
    pub fn execute_sql(&self, sql: &str) -> FacadeResult<ExecOutcome> {
        if sql.trim().is_empty() {
            return Err(FacadeError::MissingQuery);
        }

        let session = self.provider.acquire()?;
        Ok(Executor::new(&session).execute_raw(sql)?)
    }
}
