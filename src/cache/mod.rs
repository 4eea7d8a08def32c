//! Replicated invalidation cache
//!
//! An in-memory order map that is never written directly. Every mutating
//! intent is published as an envelope on a broker; the map changes only
//! when an ingestion loop feeds a received envelope back through the apply
//! path. Routing writes through publish-then-self-consume means every
//! replica, including the one that issued the write, converges through the
//! same code.

mod store;


// Re-export public types
pub use store::OrderCache;
