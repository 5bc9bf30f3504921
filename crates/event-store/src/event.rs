use chrono::{DateTime, Utc};
use common::Metadata;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Event type of a link record pointing at an event in another stream.
pub const LINK_EVENT_TYPE: &str = "$>";

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of an event within its stream.
///
/// The first event of a stream has revision 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Revision of the first event in a stream.
    pub fn first() -> Self {
        Self(0)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Global commit position of an event across all streams.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Position(u64);

impl Position {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Position of the very first event in the store.
    pub fn start() -> Self {
        Self(0)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the category of a stream: the part before the first `-`.
///
/// A stream without a dash is its own category.
pub fn category_of(stream: &str) -> &str {
    stream.split_once('-').map(|(c, _)| c).unwrap_or(stream)
}

/// An event proposed for appending.
///
/// The store assigns stream, revision, position and timestamp on commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub event_id: EventId,
    pub event_type: String,
    pub data: serde_json::Value,
    pub metadata: Metadata,
}

impl EventData {
    /// Creates an event whose data is the JSON form of `payload`.
    pub fn json<T: Serialize>(
        event_type: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::raw(event_type, serde_json::to_value(payload)?))
    }

    /// Creates an event from an already-built JSON value.
    pub fn raw(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_id: EventId::new(),
            event_type: event_type.into(),
            data,
            metadata: Metadata::new(),
        }
    }

    /// Creates a link record pointing at `target`.
    pub fn link_to(target: &EventEnvelope) -> Self {
        Self::raw(
            LINK_EVENT_TYPE,
            serde_json::Value::String(format!("{}@{}", target.revision, target.stream)),
        )
        .with_metadata(target.metadata.clone())
    }

    /// Replaces the event's metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// An event as committed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// The type discriminator (e.g. "inventory.created").
    pub event_type: String,

    /// The stream this event was appended to.
    pub stream: String,

    /// Position within `stream`.
    pub revision: Revision,

    /// Global commit position.
    pub position: Position,

    /// When the event was committed.
    pub timestamp: DateTime<Utc>,

    /// The event payload as JSON.
    pub data: serde_json::Value,

    /// Metadata supplied by the producer.
    pub metadata: Metadata,
}

impl EventEnvelope {
    /// Returns the category of the stream this event belongs to.
    pub fn category(&self) -> &str {
        category_of(&self.stream)
    }

    /// Returns true if this record is a link to another event.
    pub fn is_link(&self) -> bool {
        self.event_type == LINK_EVENT_TYPE
    }

    /// Parses the `"{revision}@{stream}"` target of a link record.
    ///
    /// Returns None for ordinary events and for malformed link data.
    pub fn link_target(&self) -> Option<(String, Revision)> {
        if !self.is_link() {
            return None;
        }
        let (revision, stream) = self.data.as_str()?.split_once('@')?;
        let revision = revision.parse().ok()?;
        Some((stream.to_string(), Revision::new(revision)))
    }

    /// Deserializes the payload into a typed value.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.clone())
    }
}

/// An event delivered to a subscriber.
///
/// When link resolution is enabled and the delivered record was a link,
/// `event` is the target and `link` the link record itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEvent {
    pub event: EventEnvelope,
    pub link: Option<EventEnvelope>,
}

impl ResolvedEvent {
    /// Wraps an event that needed no resolution.
    pub fn plain(event: EventEnvelope) -> Self {
        Self { event, link: None }
    }

    /// Returns the record that was physically stored in the subscribed stream.
    pub fn original_event(&self) -> &EventEnvelope {
        self.link.as_ref().unwrap_or(&self.event)
    }

    /// Revision of the delivery within the subscribed stream.
    pub fn original_revision(&self) -> Revision {
        self.original_event().revision
    }
}
