//! Invalidation envelope
//!
//! The wire format for one cache mutation intent: a method tag plus an
//! order snapshot, serialized as JSON and carried as an opaque message body
//! by both transports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Order;

/// The three recognized mutation methods.
///
/// The wire carries the method as a plain string so that a well-formed
/// envelope with an unrecognized method decodes successfully and is
/// rejected at apply time rather than dropped as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Save,
    Update,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Save => "save",
            Method::Update => "update",
            Method::Delete => "delete",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "save" => Ok(Method::Save),
            "update" => Ok(Method::Update),
            "delete" => Ok(Method::Delete),
            _ => Err(()),
        }
    }
}

/// One serialized cache mutation notification.
///
/// For `delete` envelopes only `order.order_id` is meaningful; the other
/// payload fields are left at their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Mutation method: `save`, `update` or `delete`
    pub method: String,
    /// Order snapshot the mutation applies to
    pub order: Order,
}

impl Envelope {
    /// Creates an envelope for a recognized method.
    pub fn new(method: Method, order: Order) -> Self {
        Self {
            method: method.as_str().to_string(),
            order,
        }
    }

    /// Serializes the envelope into a transport message body.
    pub fn to_bytes(&self) -> Result<bytes::Bytes, serde_json::Error> {
        serde_json::to_vec(self).map(bytes::Bytes::from)
    }

    /// Decodes an envelope from a transport message body.
    pub fn from_bytes(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
