//! Order Cache Module
//!
//! In-memory order map guarded by a single mutex, with all mutation
//! routed through the invalidation publisher.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::broker::Publisher;
use crate::error::{OrderError, Result};
use crate::models::{Envelope, Method, Order};

// == Order Cache ==
/// In-memory read-through cache of order snapshots.
///
/// `get` reads the local map directly. `save`, `update` and `delete` only
/// announce the mutation; the map itself is mutated exclusively by the
/// ingestion loops calling [`OrderCache::apply`]. Callers must not assume
/// a write is visible to `get` the moment the announcing call returns.
pub struct OrderCache {
    /// Order snapshots by identifier
    orders: Mutex<HashMap<String, Order>>,
    /// Outbound path for mutation announcements
    publisher: Publisher,
}

impl OrderCache {
    // == Constructor ==
    /// Creates an empty cache publishing its mutations through `publisher`.
    pub fn new(publisher: Publisher) -> Self {
        Self {
            orders: Mutex::new(HashMap::new()),
            publisher,
        }
    }

    // == Get ==
    /// Returns the current snapshot for `order_id`, if present.
    ///
    /// Lock, look up, unlock; never blocks on I/O and has no side effects.
    pub fn get(&self, order_id: &str) -> Option<Order> {
        self.orders.lock().unwrap().get(order_id).cloned()
    }

    // == Save ==
    /// Announces a save carrying the full order.
    ///
    /// Returns the publish error, if any. The entry becomes visible to
    /// `get` only once an ingestion loop applies the envelope.
    pub async fn save(&self, order: &Order) -> Result<()> {
        self.publisher.publish(Method::Save, order).await
    }

    // == Update ==
    /// Announces an update. Receivers treat it exactly like a save:
    /// replace the entry wholesale.
    pub async fn update(&self, order: &Order) -> Result<()> {
        self.publisher.publish(Method::Update, order).await
    }

    // == Delete ==
    /// Announces a delete. Only the identifier is meaningful in the
    /// envelope; the remaining payload fields stay at their defaults.
    pub async fn delete(&self, order_id: &str) -> Result<()> {
        let order = Order {
            order_id: order_id.to_string(),
            ..Order::default()
        };
        self.publisher.publish(Method::Delete, &order).await
    }

    // == Apply ==
    /// Applies one received envelope to the map. Invoked only by the
    /// ingestion loops.
    ///
    /// Save and update both upsert; delete removes, and removal of an
    /// absent key silently succeeds. An unrecognized method is a protocol
    /// error and leaves the map unchanged. Applying the same envelope
    /// twice yields the same state as applying it once, which is what
    /// makes log replay and cross-transport duplicates safe.
    pub(crate) fn apply(&self, envelope: &Envelope) -> Result<()> {
        let method: Method = envelope
            .method
            .parse()
            .map_err(|()| OrderError::UnknownMethod(envelope.method.clone()))?;
        let mut orders = self.orders.lock().unwrap();
        match method {
            Method::Save | Method::Update => {
                orders.insert(envelope.order.order_id.clone(), envelope.order.clone());
            }
            Method::Delete => {
                orders.remove(&envelope.order.order_id);
            }
        }
        Ok(())
    }

    // == Length ==
    /// Returns the current number of cached orders.
    pub fn len(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.lock().unwrap().is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::QueueBroker;

    fn test_cache() -> OrderCache {
        let broker = QueueBroker::new(8);
        OrderCache::new(Publisher::new(broker.attach("test-invalidation")))
    }

    fn order(id: &str, name: &str, cost: i64) -> Order {
        Order {
            order_id: id.to_string(),
            name: name.to_string(),
            cost,
            delivered: false,
        }
    }

    fn save_envelope(order: &Order) -> Envelope {
        Envelope::new(Method::Save, order.clone())
    }

    #[test]
    fn test_apply_save_makes_order_visible() {
        let cache = test_cache();
        let order = order("A", "widget", 10);

        cache.apply(&save_envelope(&order)).unwrap();

        assert_eq!(cache.get("A"), Some(order));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let cache = test_cache();
        let order = order("A", "widget", 10);
        let envelope = save_envelope(&order);

        cache.apply(&envelope).unwrap();
        cache.apply(&envelope).unwrap();

        assert_eq!(cache.get("A"), Some(order));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_last_applied_wins() {
        let cache = test_cache();
        let v1 = order("A", "widget", 10);
        let v2 = order("A", "widget deluxe", 25);

        cache.apply(&save_envelope(&v1)).unwrap();
        cache
            .apply(&Envelope::new(Method::Update, v2.clone()))
            .unwrap();
        assert_eq!(cache.get("A"), Some(v2.clone()));

        // Reversed order, reversed outcome.
        let reversed = test_cache();
        reversed
            .apply(&Envelope::new(Method::Update, v2))
            .unwrap();
        reversed.apply(&save_envelope(&v1)).unwrap();
        assert_eq!(reversed.get("A"), Some(v1));
    }

    #[test]
    fn test_apply_delete_removes_entry() {
        let cache = test_cache();
        cache.apply(&save_envelope(&order("A", "widget", 10))).unwrap();

        cache
            .apply(&Envelope::new(Method::Delete, order("A", "", 0)))
            .unwrap();

        assert_eq!(cache.get("A"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_delete_of_absent_order_is_idempotent() {
        let cache = test_cache();
        cache.apply(&save_envelope(&order("A", "widget", 10))).unwrap();

        let result = cache.apply(&Envelope::new(Method::Delete, order("B", "", 0)));

        assert!(result.is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unknown_method_is_rejected_without_mutation() {
        let cache = test_cache();
        let existing = order("A", "widget", 10);
        cache.apply(&save_envelope(&existing)).unwrap();

        let bad = Envelope {
            method: "purge".to_string(),
            order: order("A", "junk", 999),
        };
        let result = cache.apply(&bad);

        assert!(matches!(result, Err(OrderError::UnknownMethod(_))));
        assert_eq!(cache.get("A"), Some(existing));
    }

    #[test]
    fn test_get_of_unknown_order_returns_none() {
        let cache = test_cache();
        assert_eq!(cache.get("never-published"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_save_does_not_mutate_the_map() {
        let cache = test_cache();
        let order = order("A", "widget", 10);

        cache.save(&order).await.unwrap();

        // The envelope sits in the queue; nothing consumed it yet.
        assert_eq!(cache.get("A"), None);
    }

    #[tokio::test]
    async fn test_delete_publish_does_not_mutate_the_map() {
        let cache = test_cache();
        cache.apply(&save_envelope(&order("A", "widget", 10))).unwrap();

        cache.delete("A").await.unwrap();

        assert_eq!(cache.len(), 1, "delete only announces, it does not apply");
    }
}
