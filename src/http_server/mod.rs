//! # HTTP Server Module
//!
//! HTTP API over the database facade. Combines all endpoint routers into a
//! unified Axum server.
//!
//! # Endpoints
//!
//! - `/` and `/health` - Liveness
//! - `/tables` - Table listing
//! - `/tables/:table/schema` - Column schema of one table
//! - `/query/:table` - Validated dynamic SELECT driven by the query string
//! - `/sql` - Raw SQL execution (POST)

pub mod config;
pub mod database_routes;
pub mod errors;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use server::{build_router, HttpServer};
