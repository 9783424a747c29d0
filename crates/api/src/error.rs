//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::LookupError;
use domain::DomainError;
use orchestrator::OrchestratorError;
use store::{CacheError, StoreError};
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Orchestration error.
    Orchestrator(OrchestratorError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Orchestrator(err) => orchestrator_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn orchestrator_error_to_response(err: OrchestratorError) -> (StatusCode, String) {
    match &err {
        OrchestratorError::InvalidInput(_)
        | OrchestratorError::CustomerNotFound(_)
        | OrchestratorError::ProductNotFound(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        OrchestratorError::TransactionNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        OrchestratorError::CustomerLookup(_) | OrchestratorError::ProductLookup(_) => {
            tracing::warn!(error = %err, "upstream lookup failed");
            (StatusCode::BAD_GATEWAY, err.to_string())
        }
        OrchestratorError::Store(_)
        | OrchestratorError::Cache(_)
        | OrchestratorError::Serialization(_) => {
            tracing::error!(error = %err, "transaction request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(err: OrchestratorError) -> Self {
        ApiError::Orchestrator(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Orchestrator(OrchestratorError::InvalidInput(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("transaction store setup failed: {0}")]
    Store(#[from] StoreError),

    #[error("cache connection failed: {0}")]
    Cache(#[from] CacheError),

    #[error("lookup client setup failed: {0}")]
    Lookup(#[from] LookupError),
}
