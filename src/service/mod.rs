//! Order service
//!
//! Coordinates the read-through cache and the durable repository. Writes
//! reach both: the cache gets an invalidation announcement, the repository
//! the authoritative record. No transaction spans the two; whenever they
//! disagree, the repository wins.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::cache::OrderCache;
use crate::error::{OrderError, Result};
use crate::models::Order;
use crate::repository::Repository;

/// Request-facing CRUD operations over orders.
pub struct OrderService {
    repository: Arc<dyn Repository>,
    cache: Arc<OrderCache>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn Repository>, cache: Arc<OrderCache>) -> Self {
        Self { repository, cache }
    }

    /// Assigns a fresh identifier, announces the save to the cache and
    /// persists the record. Returns the assigned id.
    pub async fn save(&self, mut order: Order) -> Result<String> {
        order.order_id = Uuid::new_v4().to_string();
        self.cache.save(&order).await?;
        self.repository.save(&order).await?;
        Ok(order.order_id)
    }

    /// Serves reads from the cache when possible. On a miss the repository
    /// is consulted and the cache re-seeded with whatever it returned.
    pub async fn get(&self, order_id: &str) -> Result<Order> {
        if let Some(order) = self.cache.get(order_id) {
            return Ok(order);
        }
        debug!("cache miss for order '{order_id}', falling back to repository");
        match self.repository.get(order_id).await? {
            Some(order) => {
                self.cache.save(&order).await?;
                Ok(order)
            }
            None => Err(OrderError::NotFound(order_id.to_string())),
        }
    }

    /// Announces the update to the cache, then persists it.
    pub async fn update(&self, order: &Order) -> Result<()> {
        self.cache.update(order).await?;
        self.repository.update(order).await
    }

    /// Announces the delete to the cache, then removes the record.
    pub async fn delete(&self, order_id: &str) -> Result<()> {
        self.cache.delete(order_id).await?;
        self.repository.delete(order_id).await
    }
}
