//! # HTTP Server
//!
//! Main HTTP server combining the database and health routers.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::database_routes::{database_routes, DatabaseState};
use super::observability_routes::health_routes;
use crate::facade::DatabaseFacade;

/// HTTP server exposing a database facade
pub struct HttpServer {
    config: HttpServerConfig,
    facade: DatabaseFacade,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: HttpServerConfig, facade: DatabaseFacade) -> Self {
        let router = build_router(&config, facade.clone());
        Self {
            config,
            facade,
            router,
        }
    }

    /// `host:port` the server binds to
    pub fn bind_address(&self) -> String {
        self.config.bind_address()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C, then close the connection provider
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.resolve_addr()?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "sqlgate listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.facade.provider().close();
        tracing::info!("server stopped");
        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router(config: &HttpServerConfig, facade: DatabaseFacade) -> Router {
    let database_state = Arc::new(DatabaseState::new(facade));

    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(health_routes())
        .merge(database_routes(database_state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
