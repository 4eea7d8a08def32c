//! Response DTOs for the order service API
//!
//! Defines the structure of outgoing HTTP response bodies. Reads return
//! the order record directly; mutations return a short confirmation
//! carrying the affected identifier.

use serde::Serialize;

/// Response body for order creation (POST /orders)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    /// Success message
    pub message: String,
    /// The identifier assigned to the new order
    pub order_id: String,
}

impl CreateOrderResponse {
    /// Creates a new CreateOrderResponse
    pub fn new(order_id: impl Into<String>) -> Self {
        let order_id = order_id.into();
        Self {
            message: format!("Order '{}' created successfully", order_id),
            order_id,
        }
    }
}

/// Response body for order updates (PUT /orders/:id)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderResponse {
    /// Success message
    pub message: String,
    /// The identifier of the updated order
    pub order_id: String,
}

impl UpdateOrderResponse {
    /// Creates a new UpdateOrderResponse
    pub fn new(order_id: impl Into<String>) -> Self {
        let order_id = order_id.into();
        Self {
            message: format!("Order '{}' updated successfully", order_id),
            order_id,
        }
    }
}

/// Response body for order deletion (DELETE /orders/:id)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOrderResponse {
    /// Success message
    pub message: String,
    /// The identifier of the deleted order
    pub order_id: String,
}

impl DeleteOrderResponse {
    /// Creates a new DeleteOrderResponse
    pub fn new(order_id: impl Into<String>) -> Self {
        let order_id = order_id.into();
        Self {
            message: format!("Order '{}' deleted successfully", order_id),
            order_id,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
