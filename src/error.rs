//! Error types for the property cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Storage Error Enum ==
/// Errors surfaced by a property storage backend.
///
/// The cache layer never retries or rewraps these; they propagate to the
/// caller exactly as the backend produced them.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend could not be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the operation
    #[error("Storage rejected operation: {0}")]
    Rejected(String),
}

// == API Error Enum ==
/// Unified error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Property not found in the backing store
    #[error("Property not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Backend failure, passed through unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Storage(StorageError::Unavailable(msg)) => {
                (StatusCode::SERVICE_UNAVAILABLE, msg.clone())
            }
            ApiError::Storage(StorageError::Rejected(msg)) => (StatusCode::CONFLICT, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for storage-facing operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Convenience Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
