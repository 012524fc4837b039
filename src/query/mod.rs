//! # Dynamic Query Construction
//!
//! Turns an untyped, ordered set of request parameters into a
//! schema-validated, parameterized `SELECT`.
//!
//! Pipeline: [`RawParams`] → [`QuerySpec::validate`] → [`QuerySpec::compile`]
//! → [`BuiltStatement`]. Identifiers reaching SQL text always come from the
//! catalog; filter values, limit and offset are always bound parameters.

mod builder;
mod errors;
mod params;
mod spec;
mod statement;

pub use builder::QueryBuilder;
pub use errors::{QueryError, QueryResult};
pub use params::{RawParams, COLUMNS_KEY, LIMIT_KEY, OFFSET_KEY, ORDER_BY_KEY, RESERVED_KEYS};
pub use spec::{Filter, OrderBy, Projection, QuerySpec, SortDirection};
pub use statement::{BuiltStatement, SqlValue};
