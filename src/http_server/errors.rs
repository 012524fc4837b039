//! # HTTP Error Mapping
//!
//! Maps facade errors to status codes and a JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::facade::FacadeError;
use crate::query::QueryError;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Errors produced by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// Operation failure from the facade
    Facade(FacadeError),

    /// Request body could not be decoded
    InvalidBody(String),

    /// Query string could not be decoded
    InvalidQueryString(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::InvalidQueryString(_) => StatusCode::BAD_REQUEST,
            ApiError::Facade(err) => match err {
                // 404 Not Found
                FacadeError::Query(QueryError::TableNotFound(_)) => StatusCode::NOT_FOUND,
                FacadeError::SchemaNotFound(_) => StatusCode::NOT_FOUND,

                // 500 Internal Server Error
                FacadeError::Query(QueryError::Catalog(_)) => StatusCode::INTERNAL_SERVER_ERROR,
                FacadeError::Catalog(_)
                | FacadeError::Execution(_)
                | FacadeError::Unavailable(_)
                | FacadeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,

                // 400 Bad Request
                FacadeError::Query(_) | FacadeError::MissingQuery => StatusCode::BAD_REQUEST,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Facade(err) => err.to_string(),
            ApiError::InvalidBody(msg) => format!("Invalid request body: {}", msg),
            ApiError::InvalidQueryString(msg) => format!("Invalid query string: {}", msg),
        }
    }
}

impl From<FacadeError> for ApiError {
    fn from(err: FacadeError) -> Self {
        ApiError::Facade(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
        });
        (status, body).into_response()
    }
}
