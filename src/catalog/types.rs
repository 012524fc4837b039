//! Column schema types

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single column and its declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    /// Declared type as written in the table definition (may be empty)
    pub declared_type: String,
}

/// Ordered mapping of column name to declared type.
///
/// Serializes as a JSON object in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<ColumnDef>,
}

impl ColumnSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column (builder style)
    pub fn with_column(mut self, name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        self.push(name, declared_type);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, declared_type: impl Into<String>) {
        self.columns.push(ColumnDef {
            name: name.into(),
            declared_type: declared_type.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Exact, case-sensitive membership
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Declared type for an exact column name
    pub fn declared_type(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.declared_type.as_str())
    }

    /// Resolve a name case-insensitively, returning the catalog's spelling
    pub fn resolve_case_insensitive(&self, name: &str) -> Option<&str> {
        let wanted = name.to_lowercase();
        self.columns
            .iter()
            .find(|c| c.name.to_lowercase() == wanted)
            .map(|c| c.name.as_str())
    }
}

impl FromIterator<(String, String)> for ColumnSchema {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, declared_type)| ColumnDef {
                    name,
                    declared_type,
                })
                .collect(),
        }
    }
}

impl Serialize for ColumnSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(&column.name, &column.declared_type)?;
        }
        map.end()
    }
}
