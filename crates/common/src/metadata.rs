use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata key carrying the correlation id of a causal chain.
pub const CORRELATION_ID_KEY: &str = "$correlationId";

/// Fallback key accepted when reading a correlation id.
const PLAIN_CORRELATION_ID_KEY: &str = "correlationId";

/// Free-form metadata attached to commands and events.
///
/// Handlers copy the whole map from a consumed command onto every event they
/// produce, so nothing here is ever interpreted beyond the correlation id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(HashMap<String, serde_json::Value>);

impl Metadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates metadata carrying a freshly generated correlation id.
    pub fn with_new_correlation_id() -> Self {
        Self::new().with_correlation_id(Uuid::new_v4().to_string())
    }

    /// Sets the correlation id.
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.0.insert(
            CORRELATION_ID_KEY.to_string(),
            serde_json::Value::String(correlation_id.into()),
        );
        self
    }

    /// Adds an arbitrary entry.
    pub fn with(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Returns the correlation id, if any.
    ///
    /// `$correlationId` wins over `correlationId` when both are present.
    pub fn correlation_id(&self) -> Option<&str> {
        self.0
            .get(CORRELATION_ID_KEY)
            .or_else(|| self.0.get(PLAIN_CORRELATION_ID_KEY))
            .and_then(|v| v.as_str())
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.0.iter()
    }
}

impl From<HashMap<String, serde_json::Value>> for Metadata {
    fn from(map: HashMap<String, serde_json::Value>) -> Self {
        Self(map)
    }
}
