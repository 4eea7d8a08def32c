//! API Module
//!
//! HTTP handlers and routing for the order service REST API.
//!
//! # Endpoints
//! - `POST /orders` - Create an order
//! - `GET /orders/:id` - Retrieve an order by id
//! - `PUT /orders/:id` - Update an order
//! - `DELETE /orders/:id` - Delete an order
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
