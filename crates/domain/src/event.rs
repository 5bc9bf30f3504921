//! Core domain event trait.

use common::Metadata;
use event_store::EventData;
use serde::Serialize;

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain. The type
/// discriminator travels in the envelope, so `Serialize` must produce only
/// the event's data.
pub trait DomainEvent: Serialize + Send + Sync + Clone {
    /// Returns the event type name written to the envelope.
    fn event_type(&self) -> &'static str;

    /// Builds an appendable event carrying `metadata`.
    fn to_event_data(&self, metadata: Metadata) -> Result<EventData, serde_json::Error> {
        Ok(EventData::json(self.event_type(), self)?.with_metadata(metadata))
    }
}
