//! Database HTTP Routes
//!
//! Endpoints for table listing, schema lookup, dynamic queries and raw SQL.
//! Database work is blocking, so each handler moves it onto the blocking
//! pool; the session it acquires lives and dies inside that task.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::errors::ApiError;
use crate::catalog::ColumnSchema;
use crate::executor::{ExecOutcome, Row};
use crate::facade::{DatabaseFacade, FacadeError, FacadeResult};
use crate::query::RawParams;

// ==================
// Shared State
// ==================

/// Database state shared across handlers
pub struct DatabaseState {
    pub facade: DatabaseFacade,
}

impl DatabaseState {
    pub fn new(facade: DatabaseFacade) -> Self {
        Self { facade }
    }
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct SqlRequest {
    #[serde(default)]
    pub query: Option<String>,
}

// ==================
// Database Routes
// ==================

/// Create database routes
pub fn database_routes(state: Arc<DatabaseState>) -> Router {
    Router::new()
        .route("/tables", get(list_tables_handler))
        .route("/tables/:table/schema", get(get_table_schema_handler))
        .route("/query/:table", get(query_table_handler))
        .route("/sql", post(execute_sql_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

async fn run_blocking<T, F>(state: &DatabaseState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&DatabaseFacade) -> FacadeResult<T> + Send + 'static,
{
    let facade = state.facade.clone();
    let result = tokio::task::spawn_blocking(move || op(&facade))
        .await
        .map_err(|e| FacadeError::Internal(e.to_string()))?;

    Ok(result?)
}

// ==================
// Handlers
// ==================

async fn list_tables_handler(
    State(state): State<Arc<DatabaseState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let tables = run_blocking(&state, |db| db.list_tables()).await?;
    Ok(Json(tables))
}

async fn get_table_schema_handler(
    State(state): State<Arc<DatabaseState>>,
    Path(table): Path<String>,
) -> Result<Json<ColumnSchema>, ApiError> {
    let schema = run_blocking(&state, move |db| db.table_schema(&table)).await?;
    Ok(Json(schema))
}

async fn query_table_handler(
    State(state): State<Arc<DatabaseState>>,
    Path(table): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let Query(pairs) = query.map_err(|e| ApiError::InvalidQueryString(e.body_text()))?;
    let params = RawParams::from(pairs);

    tracing::debug!(table = %table, params = ?params, "dynamic query");
    let rows = run_blocking(&state, move |db| db.query_table(&table, &params)).await?;
    Ok(Json(rows))
}

async fn execute_sql_handler(
    State(state): State<Arc<DatabaseState>>,
    body: Result<Json<SqlRequest>, JsonRejection>,
) -> Result<Json<ExecOutcome>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let query = request.query.unwrap_or_default();

    let outcome = run_blocking(&state, move |db| db.execute_sql(&query)).await?;
    Ok(Json(outcome))
}
