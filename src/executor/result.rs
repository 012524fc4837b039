//! Execution results and value conversion

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rusqlite::types::ValueRef;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Message returned for statements that produce no result columns
pub const NO_ROWS_MESSAGE: &str = "Query executed successfully, no rows returned.";

/// One result row, keys in the statement's output column order
pub type Row = Map<String, Value>;

/// Outcome of running a statement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExecOutcome {
    /// Statement produced result columns (possibly zero rows)
    Rows(Vec<Row>),

    /// Statement produced no result columns
    NoRows { message: String, rows_affected: usize },
}

impl ExecOutcome {
    pub(crate) fn no_rows(rows_affected: usize) -> Self {
        ExecOutcome::NoRows {
            message: NO_ROWS_MESSAGE.to_string(),
            rows_affected,
        }
    }

    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            ExecOutcome::Rows(rows) => Some(rows),
            ExecOutcome::NoRows { .. } => None,
        }
    }

    pub fn into_rows(self) -> Vec<Row> {
        match self {
            ExecOutcome::Rows(rows) => rows,
            ExecOutcome::NoRows { .. } => Vec::new(),
        }
    }
}

/// Convert a driver value to JSON.
///
/// Blobs become base64 strings; non-finite reals become null.
pub(crate) fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Number(n.into()),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(STANDARD.encode(bytes)),
    }
}
