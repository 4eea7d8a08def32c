//! Message transports for cache invalidation
//!
//! Two broker styles deliver invalidation envelopes: a queue broker with
//! auto-acknowledged, at-most-once delivery, and an append-only log broker
//! with consumer-group offsets committed on an interval. Both expose the
//! same two capabilities behind the [`Transport`] trait: publish one
//! opaque message body, and await the next delivered one.

pub mod log;
pub mod queue;

pub use self::log::{LogBroker, LogTransport};
pub use self::queue::{QueueBroker, QueueTransport};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::error::Result;
use crate::models::{Envelope, Method, Order};

// == Broker Error ==
/// Failures reported by the transports.
#[derive(Error, Debug)]
pub enum BrokerError {
    /// The named queue no longer accepts publishes
    #[error("queue '{0}' is closed")]
    QueueClosed(String),
}

// == Transport Trait ==
/// One broker attachment usable by the invalidation protocol.
///
/// Implementations differ in delivery semantics (at-most-once for the
/// queue, offset-committed and replayable for the log) but share the same
/// surface: an outbound publish path and an inbound delivery stream.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Hands one serialized envelope to the broker's write path.
    async fn publish(&self, body: Bytes) -> std::result::Result<(), BrokerError>;

    /// Waits for the next delivered message body.
    ///
    /// Returns `None` once the transport is closed and no further
    /// deliveries can arrive.
    async fn next_delivery(&mut self) -> std::result::Result<Option<Bytes>, BrokerError>;
}

// == Publisher ==
/// The sole outbound path for locally-initiated cache mutations.
///
/// Binds exactly one transport. The cache publishes every mutation intent
/// through it and never touches its own map on the write path; the log
/// transport is consumed but not published to in normal operation.
pub struct Publisher {
    transport: Box<dyn Transport>,
}

impl Publisher {
    /// Creates a publisher bound to the given transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Serializes `{method, order}` and hands it to the transport.
    ///
    /// A transport failure is reported to the caller, who may retry or
    /// surface it; no mutation was announced, so none will be applied.
    pub async fn publish(&self, method: Method, order: &Order) -> Result<()> {
        let envelope = Envelope::new(method, order.clone());
        let body = envelope.to_bytes()?;
        self.transport.publish(body).await?;
        Ok(())
    }
}
