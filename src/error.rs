//! Error types for the cache
//!
//! Provides unified error handling using thiserror. Errors raised by a
//! `Fetcher` or a `Storage` backend are wrapped transparently so callers of
//! `Cache::get` see them verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Fetch Error ==
/// Raised by a `Fetcher` when its source cannot supply a value.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source has no value for the key
    #[error("Not found upstream: {0}")]
    NotFound(String),

    /// The source could not be reached or answered with a failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The source answered with a body that could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

// == Storage Error ==
/// Raised by a `Storage` backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// `get` was called for a key that holds no value
    #[error("Key not found in storage: {0}")]
    NotFound(String),

    /// Underlying I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Cache Error Enum ==
/// Unified error type returned by `Cache` operations and the lookup service.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The cache was configured with unusable parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Fetch(FetchError::NotFound(_)) => StatusCode::NOT_FOUND,
            CacheError::Fetch(_) => StatusCode::BAD_GATEWAY,
            CacheError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
