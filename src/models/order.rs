//! Order record
//!
//! The entity cached and persisted by the service. The cache treats an
//! order as an immutable value snapshot: entries are replaced or removed
//! wholesale, never partially updated.

use serde::{Deserialize, Serialize};

/// A single order record.
///
/// `order_id` is unique and assigned by the service layer before the first
/// save. The remaining fields are opaque payload as far as the cache is
/// concerned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier
    pub order_id: String,
    /// Human-readable order name
    pub name: String,
    /// Order cost in minor currency units
    pub cost: i64,
    /// Whether the order has been delivered
    pub delivered: bool,
}

impl Order {
    /// Creates an order with an empty identifier, to be assigned by the
    /// service layer.
    pub fn new(name: impl Into<String>, cost: i64, delivered: bool) -> Self {
        Self {
            order_id: String::new(),
            name: name.into(),
            cost,
            delivered,
        }
    }
}
