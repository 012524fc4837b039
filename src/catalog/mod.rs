//! # Schema Catalog
//!
//! Live introspection of table and column metadata. Nothing is cached:
//! every call re-reads the database so concurrent migrations are observed
//! on the next request.

mod errors;
mod memory;
mod sqlite;
mod types;

pub use errors::{CatalogError, CatalogResult};
pub use memory::StaticCatalog;
pub use sqlite::SqliteCatalog;
pub use types::{ColumnDef, ColumnSchema};

/// Source of table and column metadata
pub trait Catalog {
    /// All user tables visible to the connection, in name order
    fn list_tables(&self) -> CatalogResult<Vec<String>>;

    /// Columns of `table` in declaration order.
    ///
    /// Returns an empty schema when the table does not exist.
    fn get_schema(&self, table: &str) -> CatalogResult<ColumnSchema>;
}
