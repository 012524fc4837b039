//! # Validated Query Specification
//!
//! A [`QuerySpec`] can only be obtained through [`QuerySpec::validate`], so
//! every identifier it carries has been checked against the catalog.

use super::errors::{QueryError, QueryResult};
use super::params::RawParams;
use crate::catalog::{Catalog, ColumnSchema};

/// Sort direction for `ORDER BY`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `ASC` / `DESC`, case-insensitively
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Validated order-by clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    column: String,
    direction: Option<SortDirection>,
}

impl OrderBy {
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Explicit direction, if the request named one
    pub fn direction(&self) -> Option<SortDirection> {
        self.direction
    }
}

/// Columns to select
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    All,
    Columns(Vec<String>),
}

/// Equality filter on a catalog column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    column: String,
    value: String,
}

impl Filter {
    /// Column name as spelled in the catalog
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Strongly typed, schema-validated query request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    table: String,
    projection: Projection,
    filters: Vec<Filter>,
    order_by: Option<OrderBy>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl QuerySpec {
    /// Validate a request against the live catalog.
    ///
    /// Checks run in a fixed order and the first violation is returned:
    /// table, projection, filters, order_by, limit, offset.
    pub fn validate<C: Catalog + ?Sized>(
        catalog: &C,
        table: &str,
        params: &RawParams,
    ) -> QueryResult<Self> {
        if !catalog.list_tables()?.iter().any(|t| t == table) {
            return Err(QueryError::TableNotFound(table.to_string()));
        }

        let schema = catalog.get_schema(table)?;
        if schema.is_empty() {
            return Err(QueryError::TableNotFound(table.to_string()));
        }

        let projection = match params.columns() {
            Some(raw) => parse_projection(raw, &schema)?,
            None => Projection::All,
        };

        let filters = parse_filters(params, &schema)?;

        let order_by = params
            .order_by()
            .map(|raw| parse_order_by(raw, &schema))
            .transpose()?;

        let limit = params.limit().map(parse_limit).transpose()?;
        let offset = params.offset().map(parse_offset).transpose()?;

        Ok(Self {
            table: table.to_string(),
            projection,
            filters,
            order_by,
            limit,
            offset,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn order_by(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }
}

/// Exact-match projection; reports every unknown name at once
fn parse_projection(raw: &str, schema: &ColumnSchema) -> QueryResult<Projection> {
    let requested: Vec<String> = raw.split(',').map(|c| c.trim().to_string()).collect();

    let invalid: Vec<String> = requested
        .iter()
        .filter(|c| !schema.contains(c))
        .cloned()
        .collect();

    if !invalid.is_empty() {
        return Err(QueryError::InvalidColumn(invalid));
    }

    Ok(Projection::Columns(requested))
}

/// Case-insensitive filter matching; output uses the catalog's spelling
fn parse_filters(params: &RawParams, schema: &ColumnSchema) -> QueryResult<Vec<Filter>> {
    let mut filters: Vec<Filter> = Vec::new();

    for (key, value) in params.filters() {
        let column = schema
            .resolve_case_insensitive(key)
            .ok_or_else(|| QueryError::InvalidFilterColumn(key.to_string()))?;

        // Keys differing only in case land on the same column: last one wins.
        match filters.iter_mut().find(|f| f.column == column) {
            Some(existing) => existing.value = value.to_string(),
            None => filters.push(Filter {
                column: column.to_string(),
                value: value.to_string(),
            }),
        }
    }

    Ok(filters)
}

fn parse_order_by(raw: &str, schema: &ColumnSchema) -> QueryResult<OrderBy> {
    let invalid = || QueryError::InvalidOrderBy(raw.to_string());
    let tokens: Vec<&str> = raw.split_whitespace().collect();

    let (column, direction) = match tokens.as_slice() {
        [column] => (*column, None),
        [column, direction] => (*column, Some(SortDirection::parse(direction).ok_or_else(invalid)?)),
        _ => return Err(invalid()),
    };

    if !schema.contains(column) {
        return Err(invalid());
    }

    Ok(OrderBy {
        column: column.to_string(),
        direction,
    })
}

fn parse_limit(raw: &str) -> QueryResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(QueryError::InvalidLimit(raw.to_string())),
    }
}

fn parse_offset(raw: &str) -> QueryResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(QueryError::InvalidOffset(raw.to_string())),
    }
}
