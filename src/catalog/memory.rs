//! Fixed, in-memory catalog
//!
//! Useful for compiling queries without a database at hand.

use super::errors::CatalogResult;
use super::types::ColumnSchema;
use super::Catalog;

/// Catalog over a fixed set of tables
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tables: Vec<(String, ColumnSchema)>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a table
    pub fn with_table(mut self, name: impl Into<String>, schema: ColumnSchema) -> Self {
        let name = name.into();
        match self.tables.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = schema,
            None => self.tables.push((name, schema)),
        }
        self
    }
}

impl Catalog for StaticCatalog {
    fn list_tables(&self) -> CatalogResult<Vec<String>> {
        let mut names: Vec<String> = self.tables.iter().map(|(name, _)| name.clone()).collect();
        names.sort();
        Ok(names)
    }

    fn get_schema(&self, table: &str) -> CatalogResult<ColumnSchema> {
        Ok(self
            .tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, schema)| schema.clone())
            .unwrap_or_default())
    }
}
