//! Envelope Ingestion Loop
//!
//! Background task that receives invalidation envelopes from one transport
//! and applies them to the cache, until cancelled or the transport closes.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::broker::Transport;
use crate::cache::OrderCache;
use crate::models::Envelope;

/// First retry delay after a transport receive failure.
const INITIAL_BACKOFF: Duration = Duration::from_millis(100);
/// Retry delay ceiling.
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Spawns the ingestion loop for one transport.
///
/// The loop runs until `cancel` fires or the transport reports that it is
/// closed. A message that has already been received is handled to
/// completion before the loop checks for cancellation again. Consume-side
/// failures are terminal for a single message only: malformed envelopes
/// are dropped, apply rejections are logged, and receive errors are
/// retried after a capped backoff.
///
/// # Arguments
/// * `label` - Transport name used in log lines
/// * `transport` - The consumer-side broker attachment
/// * `cache` - Shared cache the envelopes are applied to
/// * `cancel` - Token shared by every loop in the process
///
/// # Returns
/// A JoinHandle the wiring can await during graceful shutdown.
pub fn spawn_ingestion_task<T>(
    label: &'static str,
    mut transport: T,
    cache: Arc<OrderCache>,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    T: Transport + 'static,
{
    tokio::spawn(async move {
        info!("{label} ingestion loop started");
        let mut backoff = INITIAL_BACKOFF;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("{label} ingestion loop stopping");
                    break;
                }
                delivery = transport.next_delivery() => match delivery {
                    Ok(Some(body)) => {
                        backoff = INITIAL_BACKOFF;
                        handle_delivery(label, &cache, &body);
                    }
                    Ok(None) => {
                        warn!("{label} transport closed, ingestion loop stopping");
                        break;
                    }
                    Err(err) => {
                        error!("{label} receive failed: {err}");
                        tokio::time::sleep(backoff).await;
                        backoff = (backoff * 2).min(MAX_BACKOFF);
                    }
                }
            }
        }
    })
}

/// Decodes and applies one message body.
fn handle_delivery(label: &str, cache: &OrderCache, body: &[u8]) {
    match Envelope::from_bytes(body) {
        Ok(envelope) => {
            debug!(
                "{label} received '{}' for order '{}'",
                envelope.method, envelope.order.order_id
            );
            if let Err(err) = cache.apply(&envelope) {
                error!("{label} apply failed: {err}");
            }
        }
        Err(err) => {
            // Dropped, not retried: a body that does not decode now never will.
            error!("{label} dropping malformed envelope: {err}");
        }
    }
}
