//! Appends result events to the store.

use common::Metadata;
use domain::DomainEvent;
use event_store::{EventData, EventStore, WriteResult};

use crate::Result;

/// Writes fully formed events to the store.
#[derive(Clone)]
pub struct EventEmitter<S> {
    store: S,
}

impl<S: EventStore> EventEmitter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Appends `events` to `stream` unconditionally.
    pub async fn append(
        &self,
        stream: &str,
        events: Vec<EventData>,
    ) -> event_store::Result<WriteResult> {
        self.store.append(stream, events).await
    }

    /// Serializes `event` with `metadata` and appends it to `stream`.
    pub async fn emit<E: DomainEvent>(
        &self,
        stream: &str,
        event: &E,
        metadata: Metadata,
    ) -> Result<WriteResult> {
        let data = event.to_event_data(metadata)?;
        Ok(self.append(stream, vec![data]).await?)
    }
}
