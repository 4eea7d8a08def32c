//! API Handlers
//!
//! HTTP request handlers for each order service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{OrderError, Result};
use crate::models::{
    CreateOrderResponse, DeleteOrderResponse, HealthResponse, Order, OrderRequest,
    UpdateOrderResponse,
};
use crate::service::OrderService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Order service coordinating cache and repository
    pub service: Arc<OrderService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: Arc<OrderService>) -> Self {
        Self { service }
    }
}

/// Handler for POST /orders
///
/// Creates a new order; the service assigns the identifier.
pub async fn create_order_handler(
    State(state): State<AppState>,
    Json(req): Json<OrderRequest>,
) -> Result<Json<CreateOrderResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(OrderError::InvalidRequest(error_msg));
    }

    let order = req.into_order(String::new());
    let order_id = state.service.save(order).await?;

    Ok(Json(CreateOrderResponse::new(order_id)))
}

/// Handler for GET /orders/:id
///
/// Serves the order from the cache, falling back to the repository.
pub async fn get_order_handler(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>> {
    let order = state.service.get(&order_id).await?;
    Ok(Json(order))
}

/// Handler for PUT /orders/:id
pub async fn update_order_handler(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(req): Json<OrderRequest>,
) -> Result<Json<UpdateOrderResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(OrderError::InvalidRequest(error_msg));
    }

    let order = req.into_order(order_id.clone());
    state.service.update(&order).await?;

    Ok(Json(UpdateOrderResponse::new(order_id)))
}

/// Handler for DELETE /orders/:id
pub async fn delete_order_handler(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<DeleteOrderResponse>> {
    state.service.delete(&order_id).await?;
    Ok(Json(DeleteOrderResponse::new(order_id)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::{Publisher, QueueBroker};
    use crate::cache::OrderCache;
    use crate::repository::MemoryRepository;

    fn test_state() -> AppState {
        let broker = QueueBroker::new(8);
        let cache = Arc::new(OrderCache::new(Publisher::new(broker.attach("inv"))));
        let repository = Arc::new(MemoryRepository::new());
        AppState::new(Arc::new(OrderService::new(repository, cache)))
    }

    fn request(name: &str, cost: i64) -> OrderRequest {
        OrderRequest {
            name: name.to_string(),
            cost,
            delivered: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_handler() {
        let state = test_state();

        let created = create_order_handler(State(state.clone()), Json(request("widget", 10)))
            .await
            .unwrap();
        let order_id = created.order_id.clone();

        let fetched = get_order_handler(State(state), Path(order_id.clone()))
            .await
            .unwrap();
        assert_eq!(fetched.order_id, order_id);
        assert_eq!(fetched.name, "widget");
    }

    #[tokio::test]
    async fn test_get_nonexistent_order() {
        let state = test_state();
        let result = get_order_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_handler() {
        let state = test_state();
        let created = create_order_handler(State(state.clone()), Json(request("widget", 10)))
            .await
            .unwrap();

        let updated = update_order_handler(
            State(state.clone()),
            Path(created.order_id.clone()),
            Json(request("widget deluxe", 25)),
        )
        .await;
        assert!(updated.is_ok());

        let fetched = get_order_handler(State(state), Path(created.order_id.clone()))
            .await
            .unwrap();
        assert_eq!(fetched.name, "widget deluxe");
        assert_eq!(fetched.cost, 25);
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();
        let created = create_order_handler(State(state.clone()), Json(request("widget", 10)))
            .await
            .unwrap();

        let deleted =
            delete_order_handler(State(state.clone()), Path(created.order_id.clone())).await;
        assert!(deleted.is_ok());

        let result = get_order_handler(State(state), Path(created.order_id.clone())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_invalid_request() {
        let state = test_state();
        let result = create_order_handler(State(state), Json(request("", 10))).await;
        assert!(matches!(result, Err(OrderError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
