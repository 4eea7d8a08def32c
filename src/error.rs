//! Error types for the order service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::broker::BrokerError;

// == Order Error Enum ==
/// Unified error type for the order service.
#[derive(Error, Debug)]
pub enum OrderError {
    /// Order not found in cache or repository
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Envelope carried a method outside save/update/delete
    #[error("Unknown envelope method: {0}")]
    UnknownMethod(String),

    /// Broker publish or consume failure
    #[error("Broker error: {0}")]
    Broker(#[from] BrokerError),

    /// Envelope could not be serialized or deserialized
    #[error("Envelope codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = match &self {
            OrderError::NotFound(_) => StatusCode::NOT_FOUND,
            OrderError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            OrderError::Broker(_) => StatusCode::SERVICE_UNAVAILABLE,
            OrderError::UnknownMethod(_) | OrderError::Codec(_) | OrderError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the order service.
pub type Result<T> = std::result::Result<T, OrderError>;
