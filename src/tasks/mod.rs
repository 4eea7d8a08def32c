//! Background Tasks Module
//!
//! Contains the long-lived ingestion loops, one per transport, that feed
//! received invalidation envelopes into the cache for the lifetime of the
//! process.

mod ingest;

pub use ingest::spawn_ingestion_task;
