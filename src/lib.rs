//! sqlgate - relational tables over HTTP
//!
//! Exposes a SQLite database through a small JSON API: table listing,
//! schema lookup, schema-validated dynamic SELECTs and raw SQL execution.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod executor;
pub mod facade;
pub mod http_server;
pub mod observability;
pub mod query;
