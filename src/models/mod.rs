//! Domain and wire models for the order service
//!
//! Contains the order record itself, the invalidation envelope exchanged
//! over the brokers, and the DTOs used for serializing/deserializing HTTP
//! request and response bodies.

pub mod envelope;
pub mod order;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use envelope::{Envelope, Method};
pub use order::Order;
pub use requests::OrderRequest;
pub use responses::{
    CreateOrderResponse, DeleteOrderResponse, ErrorResponse, HealthResponse, UpdateOrderResponse,
};
