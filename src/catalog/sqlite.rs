//! SQLite catalog backed by `sqlite_master` and `pragma_table_info`

use rusqlite::Connection;

use super::errors::CatalogResult;
use super::types::ColumnSchema;
use super::Catalog;

const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
     ORDER BY name";

const TABLE_COLUMNS_SQL: &str = "SELECT name, type FROM pragma_table_info(?1) ORDER BY cid";

/// Catalog reading live metadata through a borrowed connection
pub struct SqliteCatalog<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteCatalog<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl Catalog for SqliteCatalog<'_> {
    fn list_tables(&self) -> CatalogResult<Vec<String>> {
        let mut stmt = self.conn.prepare(LIST_TABLES_SQL)?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = tables.len(), "listed tables");
        Ok(tables)
    }

    fn get_schema(&self, table: &str) -> CatalogResult<ColumnSchema> {
        // Table name is bound, never interpolated.
        let mut stmt = self.conn.prepare(TABLE_COLUMNS_SQL)?;
        let schema = stmt
            .query_map([table], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<ColumnSchema, _>>()?;

        tracing::debug!(table, columns = schema.len(), "read table schema");
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, email VARCHAR(255), misc);
             CREATE TABLE audit_log (id INTEGER, entry TEXT);
             CREATE VIEW active_users AS SELECT * FROM users;
             CREATE TABLE seq_test (id INTEGER PRIMARY KEY AUTOINCREMENT);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_list_tables_sorted_without_internal_or_views() {
        let conn = setup();
        let catalog = SqliteCatalog::new(&conn);

        let tables = catalog.list_tables().unwrap();
        // AUTOINCREMENT creates sqlite_sequence, which must not be listed
        assert_eq!(tables, vec!["audit_log", "seq_test", "users"]);
    }

    #[test]
    fn test_get_schema_in_declaration_order() {
        let conn = setup();
        let catalog = SqliteCatalog::new(&conn);

        let schema = catalog.get_schema("users").unwrap();
        let names: Vec<&str> = schema.names().collect();
        assert_eq!(names, vec!["id", "name", "email", "misc"]);
        assert_eq!(schema.declared_type("email"), Some("VARCHAR(255)"));
        assert_eq!(schema.declared_type("misc"), Some(""));
    }

    #[test]
    fn test_unknown_table_yields_empty_schema() {
        let conn = setup();
        let catalog = SqliteCatalog::new(&conn);

        assert!(catalog.get_schema("nope").unwrap().is_empty());
        assert!(catalog.get_schema("users'; DROP TABLE users; --").unwrap().is_empty());
        assert!(!catalog.get_schema("users").unwrap().is_empty());
    }
}
