//! Log transport
//!
//! Delivery through append-only topic partitions. A consumer carries a
//! group identity and a read offset initialized from the group's committed
//! offset; it reads the next record with a bounded wait and commits its
//! position on an interval rather than per message. A consumer restarted
//! after a crash therefore replays the uncommitted window, which is safe
//! only because envelope apply is idempotent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Notify;
use tokio::time;
use tracing::debug;

use super::{BrokerError, Transport};

// == Log Broker ==
/// In-process log broker holding one append-only record list per
/// topic/partition pair.
#[derive(Default)]
pub struct LogBroker {
    topics: Mutex<HashMap<(String, u32), Arc<TopicLog>>>,
}

/// A single topic partition: its records, an append signal, and the
/// committed offset of each consumer group.
struct TopicLog {
    records: RwLock<Vec<Bytes>>,
    appended: Notify,
    committed: Mutex<HashMap<String, usize>>,
}

impl TopicLog {
    fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            appended: Notify::new(),
            committed: Mutex::new(HashMap::new()),
        }
    }

    fn append(&self, body: Bytes) {
        self.records.write().unwrap().push(body);
        self.appended.notify_waiters();
    }

    fn record_at(&self, offset: usize) -> Option<Bytes> {
        self.records.read().unwrap().get(offset).cloned()
    }

    fn committed_offset(&self, group: &str) -> usize {
        self.committed.lock().unwrap().get(group).copied().unwrap_or(0)
    }

    fn commit(&self, group: &str, offset: usize) {
        self.committed.lock().unwrap().insert(group.to_string(), offset);
    }
}

impl LogBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a transport attached to `topic`/`partition` for `group`,
    /// positioned at the group's committed offset. The topic is created on
    /// first attachment.
    pub fn attach(
        &self,
        topic: &str,
        partition: u32,
        group: &str,
        read_deadline: Duration,
        commit_interval: Duration,
    ) -> LogTransport {
        let mut topics = self.topics.lock().unwrap();
        let log = topics
            .entry((topic.to_string(), partition))
            .or_insert_with(|| {
                debug!("topic '{topic}/{partition}' created");
                Arc::new(TopicLog::new())
            });
        let offset = log.committed_offset(group);
        LogTransport {
            topic: topic.to_string(),
            partition,
            group: group.to_string(),
            log: Arc::clone(log),
            offset,
            read_deadline,
            commit_interval,
            last_commit: Instant::now(),
        }
    }
}

// == Log Transport ==
/// One consumer-group attachment to a topic partition.
///
/// Publishing appends to the shared log; consuming advances a private
/// offset that is committed back to the broker periodically.
pub struct LogTransport {
    topic: String,
    partition: u32,
    group: String,
    log: Arc<TopicLog>,
    offset: usize,
    read_deadline: Duration,
    commit_interval: Duration,
    last_commit: Instant,
}

impl LogTransport {
    /// Records the current read position as committed for this group.
    pub fn commit_position(&mut self) {
        self.log.commit(&self.group, self.offset);
        self.last_commit = Instant::now();
        debug!(
            "topic '{}/{}': group '{}' committed offset {}",
            self.topic, self.partition, self.group, self.offset
        );
    }

    /// Current read position, including uncommitted progress.
    pub fn position(&self) -> usize {
        self.offset
    }
}

#[async_trait]
impl Transport for LogTransport {
    async fn publish(&self, body: Bytes) -> Result<(), BrokerError> {
        self.log.append(body);
        Ok(())
    }

    async fn next_delivery(&mut self) -> Result<Option<Bytes>, BrokerError> {
        loop {
            if self.last_commit.elapsed() >= self.commit_interval {
                self.commit_position();
            }
            let appended = self.log.appended.notified();
            if let Some(record) = self.log.record_at(self.offset) {
                self.offset += 1;
                return Ok(Some(record));
            }
            // Bounded wait: an append racing past the check above is
            // picked up one deadline later at worst.
            let _ = time::timeout(self.read_deadline, appended).await;
        }
    }
}
