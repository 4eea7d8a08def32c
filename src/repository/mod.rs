//! Durable order store
//!
//! The authoritative record store behind the cache. The trait keeps the
//! service independent of the backing implementation; the in-memory
//! implementation provided here stands in for a SQL-backed one and is
//! what the process wiring uses.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{OrderError, Result};
use crate::models::Order;

// == Repository Trait ==
/// CRUD contract of the durable order store.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Persists a new order, replacing any existing record with the same id.
    async fn save(&self, order: &Order) -> Result<()>;

    /// Looks an order up by id.
    async fn get(&self, order_id: &str) -> Result<Option<Order>>;

    /// Replaces an existing order. An absent id is reported as not found.
    async fn update(&self, order: &Order) -> Result<()>;

    /// Removes an order. An absent id is reported as not found.
    async fn delete(&self, order_id: &str) -> Result<()>;
}

// == In-Memory Repository ==
/// Map-backed repository, authoritative for the process lifetime.
#[derive(Default)]
pub struct MemoryRepository {
    orders: RwLock<HashMap<String, Order>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn save(&self, order: &Order) -> Result<()> {
        self.orders
            .write()
            .await
            .insert(order.order_id.clone(), order.clone());
        Ok(())
    }

    async fn get(&self, order_id: &str) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(order_id).cloned())
    }

    async fn update(&self, order: &Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.order_id) {
            Some(existing) => {
                *existing = order.clone();
                Ok(())
            }
            None => Err(OrderError::NotFound(order.order_id.clone())),
        }
    }

    async fn delete(&self, order_id: &str) -> Result<()> {
        match self.orders.write().await.remove(order_id) {
            Some(_) => Ok(()),
            None => Err(OrderError::NotFound(order_id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, cost: i64) -> Order {
        Order {
            order_id: id.to_string(),
            name: "widget".to_string(),
            cost,
            delivered: false,
        }
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = MemoryRepository::new();
        repo.save(&order("A", 10)).await.unwrap();

        let found = repo.get("A").await.unwrap();
        assert_eq!(found, Some(order("A", 10)));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = MemoryRepository::new();
        assert_eq!(repo.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_replaces_existing() {
        let repo = MemoryRepository::new();
        repo.save(&order("A", 10)).await.unwrap();

        repo.update(&order("A", 99)).await.unwrap();

        assert_eq!(repo.get("A").await.unwrap(), Some(order("A", 99)));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = MemoryRepository::new();
        let result = repo.update(&order("A", 10)).await;
        assert!(matches!(result, Err(OrderError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_and_reports_missing() {
        let repo = MemoryRepository::new();
        repo.save(&order("A", 10)).await.unwrap();

        repo.delete("A").await.unwrap();
        assert_eq!(repo.get("A").await.unwrap(), None);

        let again = repo.delete("A").await;
        assert!(matches!(again, Err(OrderError::NotFound(_))));
    }
}
