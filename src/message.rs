//! Messages exchanged between the host and the link.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic purpose of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// State report from the node.
    Report,
    /// Request for desired state.
    Desire,
    /// Desired-state delta pushed by the remote.
    Delta,
    /// Event notification.
    Event,
    /// Connection keep-alive.
    Keepalive,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Report => "report",
            MessageKind::Desire => "desire",
            MessageKind::Delta => "delta",
            MessageKind::Event => "event",
            MessageKind::Keepalive => "keepalive",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON payload of a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content(Value);

impl Content {
    /// Build content from any serializable value.
    pub fn from_value<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_value(value).map(Self)
    }

    /// Build content from raw JSON bytes.
    ///
    /// Empty (or whitespace only) input becomes JSON `null`.
    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Null));
        }
        serde_json::from_slice(bytes).map(Self)
    }

    /// Encode as JSON bytes.
    pub fn to_json_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.0)
    }

    /// Decode into a concrete type.
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.0)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A message with its kind, JSON content and string metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub content: Content,
}

impl Message {
    pub fn new(kind: MessageKind, content: impl Into<Content>) -> Self {
        Self {
            kind,
            metadata: BTreeMap::new(),
            content: content.into(),
        }
    }

    /// Attach a metadata entry (sent as an HTTP header).
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
