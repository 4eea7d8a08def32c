//! Queue transport
//!
//! Point-to-point delivery through named queues with automatic
//! acknowledgment: a message is considered delivered the moment it is
//! handed to a consumer, before any application logic runs, so a crash
//! between receipt and apply loses that message. The log transport exists
//! as an independent second delivery path for exactly that case.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use super::{BrokerError, Transport};

// == Queue Broker ==
/// In-process queue broker holding one bounded channel per declared queue.
///
/// Consumers attached to the same queue compete for messages; each message
/// is delivered to exactly one of them.
pub struct QueueBroker {
    capacity: usize,
    queues: Mutex<HashMap<String, QueueHandles>>,
}

#[derive(Clone)]
struct QueueHandles {
    tx: mpsc::Sender<Bytes>,
    rx: Arc<AsyncMutex<mpsc::Receiver<Bytes>>>,
}

impl QueueBroker {
    /// Creates a broker whose queues buffer up to `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queues: Mutex::new(HashMap::new()),
        }
    }

    /// Declares `queue` if it does not exist yet and returns a transport
    /// attached to it. Every attachment to the same name shares one
    /// underlying channel.
    pub fn attach(&self, queue: &str) -> QueueTransport {
        let mut queues = self.queues.lock().unwrap();
        let handles = queues.entry(queue.to_string()).or_insert_with(|| {
            debug!("queue '{queue}' declared");
            let (tx, rx) = mpsc::channel(self.capacity);
            QueueHandles {
                tx,
                rx: Arc::new(AsyncMutex::new(rx)),
            }
        });
        QueueTransport {
            queue: queue.to_string(),
            tx: handles.tx.clone(),
            rx: Arc::clone(&handles.rx),
        }
    }

    /// Closes `queue`: pending messages can still be drained, further
    /// publishes fail.
    pub async fn close(&self, queue: &str) {
        let handles = self.queues.lock().unwrap().get(queue).cloned();
        if let Some(handles) = handles {
            handles.rx.lock().await.close();
            debug!("queue '{queue}' closed");
        }
    }
}

// == Queue Transport ==
/// One attachment to a named queue: a clone of the queue's send side plus
/// a share of its single receive side.
pub struct QueueTransport {
    queue: String,
    tx: mpsc::Sender<Bytes>,
    rx: Arc<AsyncMutex<mpsc::Receiver<Bytes>>>,
}

#[async_trait]
impl Transport for QueueTransport {
    async fn publish(&self, body: Bytes) -> Result<(), BrokerError> {
        self.tx
            .send(body)
            .await
            .map_err(|_| BrokerError::QueueClosed(self.queue.clone()))
    }

    async fn next_delivery(&mut self) -> Result<Option<Bytes>, BrokerError> {
        // Auto-acknowledge: the message leaves the queue as soon as recv
        // hands it over.
        let mut rx = self.rx.lock().await;
        Ok(rx.recv().await)
    }
}
