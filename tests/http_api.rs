//! HTTP API integration tests
//!
//! Drives the full router against a temporary SQLite file.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use sqlgate::config::DatabaseConfig;
use sqlgate::db::ConnectionProvider;
use sqlgate::facade::DatabaseFacade;
use sqlgate::http_server::{build_router, HttpServerConfig};

fn setup() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("api.db");

    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, email TEXT, status TEXT);
             INSERT INTO users (name, email, status) VALUES
                ('alice', 'alice@example.com', 'active'),
                ('bob', 'bob@example.com', ' active '),
                ('carol', 'carol@example.com', 'away');
             CREATE TABLE orders (id INTEGER PRIMARY KEY, user_id INTEGER, total REAL);",
        )
        .unwrap();

    let provider = ConnectionProvider::open(&DatabaseConfig::with_path(&path)).unwrap();
    let facade = DatabaseFacade::new(Arc::new(provider));
    let router = build_router(&HttpServerConfig::default(), facade);
    (dir, router)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn post_sql(router: &Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/sql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_root_and_health() {
    let (_dir, router) = setup();

    let (status, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "sqlgate is running!"}));

    let (status, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_tables() {
    let (_dir, router) = setup();

    let (status, body) = get(&router, "/tables").await;
    assert_eq!(status, StatusCode::OK);

    let mut tables: Vec<String> = serde_json::from_value(body).unwrap();
    tables.sort();
    assert_eq!(tables, vec!["orders", "users"]);
}

#[tokio::test]
async fn test_table_schema_keeps_column_order() {
    let (_dir, router) = setup();

    let (status, body) = get(&router, "/tables/users/schema").await;
    assert_eq!(status, StatusCode::OK);

    let columns: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(columns, vec!["id", "name", "email", "status"]);
    assert_eq!(body["id"], "INTEGER");
    assert_eq!(body["name"], "TEXT");
}

#[tokio::test]
async fn test_schema_of_missing_table_is_404() {
    let (_dir, router) = setup();

    let (status, body) = get(&router, "/tables/ghosts/schema").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert!(body["error"].as_str().unwrap().contains("ghosts"));
}

#[tokio::test]
async fn test_schema_table_name_is_case_sensitive() {
    let (_dir, router) = setup();

    let (status, _) = get(&router, "/tables/USERS/schema").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&router, "/query/USERS").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_query_with_projection_filter_and_limit() {
    let (_dir, router) = setup();

    let (status, body) = get(
        &router,
        "/query/users?columns=name,email&status=active&order_by=name%20DESC&limit=5",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"name": "bob", "email": "bob@example.com"},
            {"name": "alice", "email": "alice@example.com"},
        ])
    );
}

#[tokio::test]
async fn test_query_filter_key_is_case_insensitive() {
    let (_dir, router) = setup();

    let (status, body) = get(&router, "/query/users?STATUS=away&columns=name").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"name": "carol"}]));
}

#[tokio::test]
async fn test_query_offset_without_limit() {
    let (_dir, router) = setup();

    let (status, body) = get(&router, "/query/users?columns=id&order_by=id&offset=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 3}]));
}

#[tokio::test]
async fn test_query_empty_result_is_empty_array() {
    let (_dir, router) = setup();

    let (status, body) = get(&router, "/query/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_query_unknown_table_is_404() {
    let (_dir, router) = setup();

    let (status, body) = get(&router, "/query/ghosts").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_query_validation_failures_are_400() {
    let (_dir, router) = setup();

    for uri in [
        "/query/users?columns=name,password",
        "/query/users?nickname=x",
        "/query/users?order_by=name%20FOO",
        "/query/users?order_by=Name",
        "/query/users?limit=0",
        "/query/users?limit=abc",
        "/query/users?offset=-1",
    ] {
        let (status, body) = get(&router, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], 400, "{}", uri);
    }

    let (_, body) = get(&router, "/query/users?columns=name,password,secret").await;
    assert!(body["error"].as_str().unwrap().contains("'password', 'secret'"));

    let (status, body) = get(&router, "/query/users?columns=name,,email").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().ends_with("requested: ''"));
}

#[tokio::test]
async fn test_sql_select_returns_rows() {
    let (_dir, router) = setup();

    let (status, body) = post_sql(&router, r#"{"query": "SELECT name FROM users ORDER BY id LIMIT 1"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"name": "alice"}]));
}

#[tokio::test]
async fn test_sql_statement_without_rows() {
    let (_dir, router) = setup();

    let (status, body) = post_sql(
        &router,
        r#"{"query": "INSERT INTO orders (user_id, total) VALUES (1, 9.5)"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Query executed successfully, no rows returned.");
    assert_eq!(body["rows_affected"], 1);

    let (_, body) = get(&router, "/query/orders?columns=total").await;
    assert_eq!(body, json!([{"total": 9.5}]));
}

#[tokio::test]
async fn test_sql_missing_query_is_400() {
    let (_dir, router) = setup();

    let (status, body) = post_sql(&router, "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = post_sql(&router, "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sql_multiple_statements_rejected_without_side_effects() {
    let (_dir, router) = setup();

    let (status, body) = post_sql(
        &router,
        r#"{"query": "UPDATE users SET status = 'x' WHERE id = 1; DELETE FROM users"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("multiple statements"));

    let (_, body) = post_sql(&router, r#"{"query": "SELECT COUNT(*) AS n FROM users"}"#).await;
    assert_eq!(body, json!([{"n": 3}]));

    let (_, body) = get(&router, "/query/users?id=1&columns=status").await;
    assert_eq!(body, json!([{"status": "active"}]));
}

#[tokio::test]
async fn test_sql_comment_only_is_400() {
    let (_dir, router) = setup();

    let (status, body) = post_sql(&router, r#"{"query": "-- nothing to run"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_sql_failure_is_500_with_driver_message() {
    let (_dir, router) = setup();

    let (status, body) = post_sql(&router, r#"{"query": "SELECT * FROM ghosts"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert!(body["error"].as_str().unwrap().contains("no such table"));
}
