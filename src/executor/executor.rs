//! Executor for compiled statements

use rusqlite::types::ToSql;
use rusqlite::{Connection, Statement};

use super::errors::ExecResult;
use super::result::{to_json, ExecOutcome, Row};
use crate::query::BuiltStatement;

/// Runs statements on a borrowed connection. Never retries.
pub struct Executor<'c> {
    pub(super) conn: &'c Connection,
}

impl<'c> Executor<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Execute a compiled statement with its bound parameters
    pub fn execute(&self, statement: &BuiltStatement) -> ExecResult<ExecOutcome> {
        let named = statement.named_params();
        let bound: Vec<(&str, &dyn ToSql)> =
            named.iter().map(|(name, value)| (name.as_str(), *value)).collect();

        let outcome = self.run(statement.sql(), &bound)?;
        if let Some(rows) = outcome.rows() {
            tracing::debug!(rows = rows.len(), "statement executed");
        }
        Ok(outcome)
    }

    fn run(&self, sql: &str, params: &[(&str, &dyn ToSql)]) -> ExecResult<ExecOutcome> {
        let mut stmt = self.conn.prepare(sql)?;
        run_statement(&mut stmt, params)
    }
}

/// Run an already prepared statement and collect its outcome
pub(super) fn run_statement(
    stmt: &mut Statement<'_>,
    params: &[(&str, &dyn ToSql)],
) -> ExecResult<ExecOutcome> {
    if stmt.column_count() == 0 {
        let affected = stmt.execute(params)?;
        return Ok(ExecOutcome::no_rows(affected));
    }

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt.query(params)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = Row::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            record.insert(name.clone(), to_json(row.get_ref(i)?));
        }
        out.push(record);
    }

    Ok(ExecOutcome::Rows(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SqliteCatalog;
    use crate::query::{QueryBuilder, RawParams};
    use serde_json::json;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, status TEXT, score REAL);
             INSERT INTO users (name, status, score) VALUES
                ('alice', 'active', 1.5),
                ('bob', '  active ', 2.0),
                ('carol', 'inactive', NULL),
                ('dave', 'active', 4.25);",
        )
        .unwrap();
        conn
    }

    fn run(conn: &Connection, params: RawParams) -> Vec<Row> {
        let catalog = SqliteCatalog::new(conn);
        let stmt = QueryBuilder::new(&catalog).build("users", &params).unwrap();
        Executor::new(conn).execute(&stmt).unwrap().into_rows()
    }

    #[test]
    fn test_trimmed_equality_filter() {
        let conn = setup();
        let rows = run(&conn, RawParams::new().with("status", " active").with("columns", "name"));

        let names: Vec<_> = rows.iter().map(|r| r["name"].clone()).collect();
        assert_eq!(names, vec![json!("alice"), json!("bob"), json!("dave")]);
    }

    #[test]
    fn test_order_limit_offset() {
        let conn = setup();
        let rows = run(
            &conn,
            RawParams::new()
                .with("order_by", "score desc")
                .with("limit", "2")
                .with("offset", "1")
                .with("columns", "name,score"),
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], json!("bob"));
        assert_eq!(rows[1]["name"], json!("alice"));
    }

    #[test]
    fn test_projection_order_is_preserved() {
        let conn = setup();
        let rows = run(&conn, RawParams::new().with("columns", "status,id").with("limit", "1"));

        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["status", "id"]);
    }

    #[test]
    fn test_null_values() {
        let conn = setup();
        let rows = run(&conn, RawParams::new().with("name", "carol"));
        assert_eq!(rows[0]["score"], serde_json::Value::Null);
    }
}
