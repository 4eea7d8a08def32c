//! Ordercast - an order-record service with a replicated invalidation cache
//!
//! CRUD operations over orders, where cache mutations are announced on a
//! queue transport and a log transport and applied by background ingestion
//! loops rather than written directly.

pub mod api;
pub mod broker;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_ingestion_task;
