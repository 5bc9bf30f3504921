use async_trait::async_trait;

use crate::{EventData, EventEnvelope, Position, Result, Revision, Subscription};

/// Acknowledgement of a successful append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteResult {
    /// Revision of the last event written.
    pub next_revision: Revision,
    /// Commit position of the last event written.
    pub position: Position,
}

/// Options for subscribing to a stream.
///
/// Subscriptions always start at the end of the stream: only events
/// appended after the subscription is opened are delivered.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscribeOptions {
    /// Follow link records to the events they point at.
    pub resolve_link_tos: bool,
}

impl SubscribeOptions {
    /// New events only.
    pub fn from_end() -> Self {
        Self::default()
    }

    /// Enables link resolution.
    pub fn resolve_link_tos(mut self) -> Self {
        self.resolve_link_tos = true;
        self
    }
}

/// Stream-oriented event store.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends events to a stream.
    ///
    /// Appends are unconditional. Events are appended atomically and become
    /// visible to readers and subscribers as soon as the call returns.
    async fn append(&self, stream: &str, events: Vec<EventData>) -> Result<WriteResult>;

    /// Reads a whole stream in revision order.
    ///
    /// A stream that was never written reads as empty.
    async fn read_stream(&self, stream: &str) -> Result<Vec<EventEnvelope>>;

    /// Reads all events with a commit position at or after `from`, in commit order.
    async fn read_all_from(&self, from: Position) -> Result<Vec<EventEnvelope>>;

    /// Returns the revision of the last event in a stream, or None if it doesn't exist.
    async fn stream_revision(&self, stream: &str) -> Result<Option<Revision>>;

    /// Opens an ordered subscription to a stream, starting at its end.
    async fn subscribe_to_stream(
        &self,
        stream: &str,
        options: SubscribeOptions,
    ) -> Result<Subscription>;
}

/// Extension trait providing convenience methods for event stores.
#[async_trait]
pub trait EventStoreExt: EventStore {
    /// Appends a single event.
    async fn append_event(&self, stream: &str, event: EventData) -> Result<WriteResult> {
        self.append(stream, vec![event]).await
    }
}

// Blanket implementation for all EventStore implementations
impl<T: EventStore + ?Sized> EventStoreExt for T {}

/// Error returned when an append request is malformed.
#[derive(Debug, Clone)]
pub struct AppendValidationError {
    pub message: String,
}

impl std::fmt::Display for AppendValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Append validation error: {}", self.message)
    }
}

impl std::error::Error for AppendValidationError {}

/// Validates an append request before it touches the log.
pub fn validate_events_for_append(
    stream: &str,
    events: &[EventData],
) -> std::result::Result<(), AppendValidationError> {
    if stream.trim().is_empty() {
        return Err(AppendValidationError {
            message: "Stream name must not be empty".to_string(),
        });
    }

    if events.is_empty() {
        return Err(AppendValidationError {
            message: "Cannot append empty event list".to_string(),
        });
    }

    if let Some(event) = events.iter().find(|e| e.event_type.trim().is_empty()) {
        return Err(AppendValidationError {
            message: format!("Event {} has an empty type", event.event_id),
        });
    }

    Ok(())
}
