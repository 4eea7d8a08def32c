//! Request DTOs for the order service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::models::Order;

/// Request body for creating (POST /orders) or updating
/// (PUT /orders/:id) an order.
///
/// # Fields
/// - `name`: Human-readable order name
/// - `cost`: Order cost, non-negative
/// - `delivered`: Delivery flag, defaults to false
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    /// The order name
    pub name: String,
    /// The order cost
    pub cost: i64,
    /// Whether the order has been delivered
    #[serde(default)]
    pub delivered: bool,
}

impl OrderRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() {
            return Some("Order name cannot be empty".to_string());
        }
        if self.cost < 0 {
            return Some("Order cost cannot be negative".to_string());
        }
        None
    }

    /// Builds an order carrying the given identifier from this payload.
    pub fn into_order(self, order_id: impl Into<String>) -> Order {
        Order {
            order_id: order_id.into(),
            name: self.name,
            cost: self.cost,
            delivered: self.delivered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_request_deserialize() {
        let json = r#"{"name": "widget", "cost": 10}"#;
        let req: OrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "widget");
        assert_eq!(req.cost, 10);
        assert!(!req.delivered);
    }

    #[test]
    fn test_order_request_with_delivered() {
        let json = r#"{"name": "widget", "cost": 10, "delivered": true}"#;
        let req: OrderRequest = serde_json::from_str(json).unwrap();
        assert!(req.delivered);
    }

    #[test]
    fn test_validate_empty_name() {
        let req = OrderRequest {
            name: "".to_string(),
            cost: 10,
            delivered: false,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_negative_cost() {
        let req = OrderRequest {
            name: "widget".to_string(),
            cost: -1,
            delivered: false,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = OrderRequest {
            name: "widget".to_string(),
            cost: 10,
            delivered: false,
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_into_order() {
        let req = OrderRequest {
            name: "widget".to_string(),
            cost: 10,
            delivered: true,
        };
        let order = req.into_order("o-1");
        assert_eq!(order.order_id, "o-1");
        assert_eq!(order.name, "widget");
        assert_eq!(order.cost, 10);
        assert!(order.delivered);
    }
}
