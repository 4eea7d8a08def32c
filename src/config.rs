//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables.

use std::env;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Name of the invalidation queue
    pub queue_name: String,
    /// Maximum number of buffered messages per queue
    pub queue_depth: usize,
    /// Topic the log consumer reads
    pub log_topic: String,
    /// Partition within the topic
    pub log_partition: u32,
    /// Consumer-group identity of this process's log consumer
    pub consumer_group: String,
    /// Bounded wait for the next log record, in milliseconds
    pub read_deadline_ms: u64,
    /// Interval between log offset commits, in milliseconds
    pub commit_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `QUEUE_NAME` - Invalidation queue name (default: "order-invalidation")
    /// - `QUEUE_DEPTH` - Queue buffer size (default: 256)
    /// - `LOG_TOPIC` - Log topic name (default: "orders")
    /// - `LOG_PARTITION` - Log partition (default: 0)
    /// - `CONSUMER_GROUP` - Log consumer group (default: "order-cache")
    /// - `READ_DEADLINE_MS` - Log read deadline (default: 1000)
    /// - `COMMIT_INTERVAL_MS` - Log commit interval (default: 1000)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            queue_name: env::var("QUEUE_NAME").unwrap_or_else(|_| "order-invalidation".to_string()),
            queue_depth: env::var("QUEUE_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
            log_topic: env::var("LOG_TOPIC").unwrap_or_else(|_| "orders".to_string()),
            log_partition: env::var("LOG_PARTITION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            consumer_group: env::var("CONSUMER_GROUP")
                .unwrap_or_else(|_| "order-cache".to_string()),
            read_deadline_ms: env::var("READ_DEADLINE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            commit_interval_ms: env::var("COMMIT_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
        }
    }

    /// Bounded wait applied to each log read.
    pub fn read_deadline(&self) -> Duration {
        Duration::from_millis(self.read_deadline_ms)
    }

    /// Interval between log offset commits.
    pub fn commit_interval(&self) -> Duration {
        Duration::from_millis(self.commit_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            queue_name: "order-invalidation".to_string(),
            queue_depth: 256,
            log_topic: "orders".to_string(),
            log_partition: 0,
            consumer_group: "order-cache".to_string(),
            read_deadline_ms: 1000,
            commit_interval_ms: 1000,
        }
    }
}
