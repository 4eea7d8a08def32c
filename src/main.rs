//! Ordercast - an order-record service with a replicated invalidation cache
//!
//! CRUD operations over orders, where cache mutations are announced on a
//! queue transport and a log transport and applied by background ingestion
//! loops rather than written directly.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ordercast::api::{create_router, AppState};
use ordercast::broker::{LogBroker, Publisher, QueueBroker};
use ordercast::cache::OrderCache;
use ordercast::config::Config;
use ordercast::repository::MemoryRepository;
use ordercast::service::OrderService;
use ordercast::tasks::spawn_ingestion_task;

/// Main entry point for the order service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct the queue and log brokers and attach transports
/// 4. Create the order cache around the queue publisher
/// 5. Start one ingestion loop per transport
/// 6. Create the repository, service and Axum router
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ordercast=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ordercast order service");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, queue={}, topic={}/{}, group={}",
        config.server_port,
        config.queue_name,
        config.log_topic,
        config.log_partition,
        config.consumer_group
    );

    // Brokers and transports. One queue attachment publishes, a second one
    // consumes; the log transport is consume-only here.
    let queue_broker = QueueBroker::new(config.queue_depth);
    let log_broker = LogBroker::new();
    let queue_publisher = queue_broker.attach(&config.queue_name);
    let queue_consumer = queue_broker.attach(&config.queue_name);
    let log_consumer = log_broker.attach(
        &config.log_topic,
        config.log_partition,
        &config.consumer_group,
        config.read_deadline(),
        config.commit_interval(),
    );
    info!("Brokers connected");

    // Cache with its invalidation publisher
    let cache = Arc::new(OrderCache::new(Publisher::new(queue_publisher)));

    // One ingestion loop per transport, sharing a cancellation token
    let cancel = CancellationToken::new();
    let queue_loop = spawn_ingestion_task("queue", queue_consumer, cache.clone(), cancel.clone());
    let log_loop = spawn_ingestion_task("log", log_consumer, cache.clone(), cancel.clone());
    info!("Ingestion loops started");

    // Service and router
    let repository = Arc::new(MemoryRepository::new());
    let service = Arc::new(OrderService::new(repository, cache));
    let app = create_router(AppState::new(service));

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop both ingestion loops and wait for them to finish
    cancel.cancel();
    let _ = tokio::join!(queue_loop, log_loop);

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
