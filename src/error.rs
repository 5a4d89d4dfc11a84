//! Error types for the amenity service
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Key Error ==
/// Rejected cache key components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Subject id cannot be empty")]
    EmptySubject,

    #[error("Subject id contains reserved character {0:?}")]
    ReservedCharacter(char),

    #[error("Radius must be a positive number of meters")]
    ZeroRadius,
}

// == Tier Error ==
/// Failure of a single remote tier operation.
///
/// Never reaches callers of the cache; the coordinator matches on it and
/// degrades the operation to a miss or a no-op.
#[derive(Error, Debug)]
pub enum TierError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote tier timed out after {0:?}")]
    Timeout(Duration),
}

// == Lookup Error ==
/// Failure reported by a places lookup provider.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Places provider unavailable: {0}")]
    Unavailable(String),
}

// == App Error Enum ==
/// Error type surfaced at the HTTP boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Listing not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<KeyError> for AppError {
    fn from(err: KeyError) -> Self {
        AppError::InvalidRequest(err.to_string())
    }
}

impl From<crate::models::UnknownCategory> for AppError {
    fn from(err: crate::models::UnknownCategory) -> Self {
        AppError::InvalidRequest(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP layer and service.
pub type Result<T> = std::result::Result<T, AppError>;
