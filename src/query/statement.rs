//! # Statement Compilation
//!
//! Compiles a [`QuerySpec`] into SQL text plus named bound parameters.
//! Identifiers are interpolated (they come from the catalog); values never
//! are.

use std::collections::HashSet;

use rusqlite::types::{ToSql, ToSqlOutput};
use serde::Serialize;

use super::params::{LIMIT_KEY, OFFSET_KEY};
use super::spec::{Projection, QuerySpec};

/// A bound parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlValue::Text(s) => s.to_sql(),
            SqlValue::Integer(n) => n.to_sql(),
        }
    }
}

/// SQL text plus its named parameters (names without the leading `:`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltStatement {
    sql: String,
    params: Vec<(String, SqlValue)>,
}

impl BuiltStatement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[(String, SqlValue)] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&SqlValue> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Parameters keyed the way the driver expects (`:name`)
    pub fn named_params(&self) -> Vec<(String, &dyn ToSql)> {
        self.params
            .iter()
            .map(|(name, value)| (format!(":{}", name), value as &dyn ToSql))
            .collect()
    }
}

impl QuerySpec {
    /// Render `SELECT <proj> FROM <table> [WHERE] [ORDER BY] [LIMIT] [OFFSET]`
    pub fn compile(&self) -> BuiltStatement {
        let mut sql = String::from("SELECT ");
        let mut params = Vec::new();

        match self.projection() {
            Projection::All => sql.push('*'),
            Projection::Columns(columns) => {
                let quoted: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
                sql.push_str(&quoted.join(", "));
            }
        }

        sql.push_str(" FROM ");
        sql.push_str(&quote_ident(self.table()));

        if !self.filters().is_empty() {
            let mut names = PlaceholderNames::new();
            let predicates: Vec<String> = self
                .filters()
                .iter()
                .map(|filter| {
                    let name = names.claim(filter.column());
                    let predicate = format!(
                        "TRIM({}) = TRIM(:{})",
                        quote_ident(filter.column()),
                        name
                    );
                    params.push((name, SqlValue::Text(filter.value().to_string())));
                    predicate
                })
                .collect();

            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }

        if let Some(order) = self.order_by() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&quote_ident(order.column()));
            if let Some(direction) = order.direction() {
                sql.push(' ');
                sql.push_str(direction.as_sql());
            }
        }

        match (self.limit(), self.offset()) {
            (Some(limit), _) => {
                sql.push_str(" LIMIT :limit");
                params.push((LIMIT_KEY.to_string(), SqlValue::Integer(limit)));
            }
            // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded.
            (None, Some(_)) => sql.push_str(" LIMIT -1"),
            (None, None) => {}
        }

        if let Some(offset) = self.offset() {
            sql.push_str(" OFFSET :offset");
            params.push((OFFSET_KEY.to_string(), SqlValue::Integer(offset)));
        }

        BuiltStatement { sql, params }
    }
}

/// SQLite keywords; a column or table spelled like one must be quoted
const SQLITE_KEYWORDS: &[&str] = &[
    "ABORT", "ACTION", "ADD", "AFTER", "ALL", "ALTER", "ALWAYS", "ANALYZE", "AND", "AS", "ASC",
    "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN", "BETWEEN", "BY", "CASCADE", "CASE", "CAST",
    "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONFLICT", "CONSTRAINT", "CREATE", "CROSS",
    "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "DATABASE", "DEFAULT",
    "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DETACH", "DISTINCT", "DO", "DROP", "EACH",
    "ELSE", "END", "ESCAPE", "EXCEPT", "EXCLUDE", "EXCLUSIVE", "EXISTS", "EXPLAIN", "FAIL",
    "FILTER", "FIRST", "FOLLOWING", "FOR", "FOREIGN", "FROM", "FULL", "GENERATED", "GLOB",
    "GROUP", "GROUPS", "HAVING", "IF", "IGNORE", "IMMEDIATE", "IN", "INDEX", "INDEXED",
    "INITIALLY", "INNER", "INSERT", "INSTEAD", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN",
    "KEY", "LAST", "LEFT", "LIKE", "LIMIT", "MATCH", "MATERIALIZED", "NATURAL", "NO", "NOT",
    "NOTHING", "NOTNULL", "NULL", "NULLS", "OF", "OFFSET", "ON", "OR", "ORDER", "OTHERS",
    "OUTER", "OVER", "PARTITION", "PLAN", "PRAGMA", "PRECEDING", "PRIMARY", "QUERY", "RAISE",
    "RANGE", "RECURSIVE", "REFERENCES", "REGEXP", "REINDEX", "RELEASE", "RENAME", "REPLACE",
    "RESTRICT", "RETURNING", "RIGHT", "ROLLBACK", "ROW", "ROWS", "SAVEPOINT", "SELECT", "SET",
    "TABLE", "TEMP", "TEMPORARY", "THEN", "TIES", "TO", "TRANSACTION", "TRIGGER", "UNBOUNDED",
    "UNION", "UNIQUE", "UPDATE", "USING", "VACUUM", "VALUES", "VIEW", "VIRTUAL", "WHEN",
    "WHERE", "WINDOW", "WITH", "WITHOUT",
];

/// Emit an identifier verbatim when it is a plain name, double-quoted otherwise
fn quote_ident(name: &str) -> String {
    if is_plain_identifier(name) && !is_keyword(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_keyword(name: &str) -> bool {
    SQLITE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(name))
}

/// Hands out unique placeholder names for filter parameters.
///
/// SQLite compares parameter names case-sensitively but column names are
/// not, so uniqueness is tracked case-insensitively.
struct PlaceholderNames {
    taken: HashSet<String>,
}

impl PlaceholderNames {
    fn new() -> Self {
        let taken = [LIMIT_KEY, OFFSET_KEY]
            .iter()
            .map(|k| k.to_string())
            .collect();
        Self { taken }
    }

    fn claim(&mut self, column: &str) -> String {
        let usable = !column.is_empty()
            && column.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        let base = if usable { column } else { "param" };

        let mut candidate = base.to_string();
        let mut n = 1;
        while self.taken.contains(&candidate.to_lowercase()) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }

        self.taken.insert(candidate.to_lowercase());
        candidate
    }
}
