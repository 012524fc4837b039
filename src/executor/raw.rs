//! Raw SQL passthrough.
//!
//! Deliberately unguarded: the caller's statement runs verbatim. This path
//! does not touch the query builder or its identifier checks.

use rusqlite::types::ToSql;
use rusqlite::Batch;

use super::errors::{ExecError, ExecResult};
use super::executor::{run_statement, Executor};
use super::result::ExecOutcome;

impl Executor<'_> {
    /// Execute caller-supplied SQL without validation.
    ///
    /// The text must hold exactly one statement. A second statement is
    /// rejected before anything runs, and text with no statement at all
    /// (blank or comments only) is [`ExecError::EmptyStatement`].
    pub fn execute_raw(&self, sql: &str) -> ExecResult<ExecOutcome> {
        tracing::info!(len = sql.len(), "executing raw sql");

        self.execute_single(sql).map_err(|e| {
            tracing::warn!(error = %e, "raw sql failed");
            e
        })
    }

    fn execute_single(&self, sql: &str) -> ExecResult<ExecOutcome> {
        let mut batch = Batch::new(self.conn, sql);

        let mut stmt = batch.next()?.ok_or(ExecError::EmptyStatement)?;
        if batch.next()?.is_some() {
            return Err(ExecError::ExecutionFailed(
                "multiple statements are not supported; send one statement per request".into(),
            ));
        }

        let no_params: &[(&str, &dyn ToSql)] = &[];
        run_statement(&mut stmt, no_params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ExecError, NO_ROWS_MESSAGE};
    use rusqlite::Connection;
    use serde_json::json;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT, data BLOB);
             INSERT INTO notes (body, data) VALUES ('first', x'00ff');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_raw_select_returns_rows() {
        let conn = setup();
        let outcome = Executor::new(&conn)
            .execute_raw("SELECT body, data, 1 + 1 AS two FROM notes")
            .unwrap();

        let rows = outcome.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["body"], json!("first"));
        assert_eq!(rows[0]["data"], json!("AP8="));
        assert_eq!(rows[0]["two"], json!(2));
    }

    #[test]
    fn test_raw_write_returns_no_rows_message() {
        let conn = setup();
        let outcome = Executor::new(&conn)
            .execute_raw("UPDATE notes SET body = 'changed'")
            .unwrap();

        assert_eq!(
            outcome,
            ExecOutcome::NoRows {
                message: NO_ROWS_MESSAGE.to_string(),
                rows_affected: 1,
            }
        );
    }

    #[test]
    fn test_raw_error_carries_driver_message() {
        let conn = setup();
        let err = Executor::new(&conn)
            .execute_raw("SELECT * FROM missing_table")
            .unwrap_err();

        assert!(matches!(err, ExecError::ExecutionFailed(ref m) if m.contains("no such table")));
    }

    #[test]
    fn test_raw_multiple_statements_rejected_before_running() {
        let conn = setup();
        let err = Executor::new(&conn)
            .execute_raw("UPDATE notes SET body = 'changed'; DELETE FROM notes")
            .unwrap_err();
        assert!(matches!(err, ExecError::ExecutionFailed(ref m) if m.contains("multiple statements")));

        let body: String = conn
            .query_row("SELECT body FROM notes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(body, "first");
    }

    #[test]
    fn test_raw_trailing_separator_and_comment_allowed() {
        let conn = setup();
        let outcome = Executor::new(&conn)
            .execute_raw("SELECT body FROM notes; -- done")
            .unwrap();
        assert_eq!(outcome.rows().unwrap().len(), 1);
    }

    #[test]
    fn test_raw_comment_only_is_empty() {
        let conn = setup();
        let err = Executor::new(&conn)
            .execute_raw("-- nothing here\n/* or here */")
            .unwrap_err();
        assert_eq!(err, ExecError::EmptyStatement);
    }
}
