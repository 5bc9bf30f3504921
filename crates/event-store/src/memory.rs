use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    EventData, EventEnvelope, EventStoreError, Position, ResolvedEvent, Result, Revision,
    Subscription,
    store::{EventStore, SubscribeOptions, WriteResult, validate_events_for_append},
    subscription::SubscriptionSender,
};

struct StreamSubscriber {
    stream: String,
    resolve_link_tos: bool,
    sender: SubscriptionSender,
}

#[derive(Default)]
struct StoreState {
    /// Every committed event, indexed by commit position.
    log: Vec<EventEnvelope>,
    /// Log indices of each stream's events, in revision order.
    streams: HashMap<String, Vec<usize>>,
    subscribers: Vec<StreamSubscriber>,
    fail_appends_to: Option<String>,
}

impl StoreState {
    fn stream_revision(&self, stream: &str) -> Option<Revision> {
        self.streams
            .get(stream)
            .and_then(|indices| indices.len().checked_sub(1))
            .map(|last| Revision::new(last as u64))
    }

    fn event_at(&self, stream: &str, revision: Revision) -> Option<&EventEnvelope> {
        let index = *self.streams.get(stream)?.get(revision.as_u64() as usize)?;
        self.log.get(index)
    }

    fn resolve(&self, event: &EventEnvelope, resolve_link_tos: bool) -> ResolvedEvent {
        if resolve_link_tos
            && let Some((stream, revision)) = event.link_target()
            && let Some(target) = self.event_at(&stream, revision)
        {
            return ResolvedEvent {
                event: target.clone(),
                link: Some(event.clone()),
            };
        }
        // Unresolvable links are delivered as-is.
        ResolvedEvent::plain(event.clone())
    }

    /// Pushes freshly committed events to the stream's subscribers and
    /// forgets subscribers whose receiving half is gone.
    fn notify(&mut self, stream: &str, committed: &[usize]) {
        let mut subscribers = std::mem::take(&mut self.subscribers);
        subscribers.retain(|sub| {
            if sub.stream != stream {
                return !sub.sender.is_closed();
            }
            committed.iter().all(|&index| {
                let resolved = self.resolve(&self.log[index], sub.resolve_link_tos);
                sub.sender.send(Ok(resolved)).is_ok()
            })
        });
        self.subscribers = subscribers;
    }
}

/// In-memory event store.
///
/// Models the contract of a stream store: per-stream revisions, a global
/// commit order, ordered subscriptions and link resolution. Nothing is
/// persisted.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryEventStore {
    /// Creates a new empty in-memory event store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of events stored.
    pub async fn event_count(&self) -> usize {
        self.state.read().await.log.len()
    }

    /// Returns the number of live subscriptions.
    pub async fn subscriber_count(&self) -> usize {
        let state = self.state.read().await;
        state
            .subscribers
            .iter()
            .filter(|s| !s.sender.is_closed())
            .count()
    }

    /// Makes every append to `stream` fail with `Unavailable`.
    ///
    /// Pass None to restore normal behaviour.
    pub async fn set_fail_on_append(&self, stream: Option<&str>) {
        self.state.write().await.fail_appends_to = stream.map(str::to_string);
    }

    /// Ends every open subscription.
    pub async fn close_subscriptions(&self) {
        self.state.write().await.subscribers.clear();
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, stream: &str, events: Vec<EventData>) -> Result<WriteResult> {
        validate_events_for_append(stream, &events)
            .map_err(|e| EventStoreError::InvalidAppend(e.message))?;

        let mut state = self.state.write().await;

        if state.fail_appends_to.as_deref() == Some(stream) {
            return Err(EventStoreError::Unavailable(format!(
                "appends to {stream} are failing"
            )));
        }

        let count = events.len();
        let timestamp = Utc::now();
        let mut revision = state
            .stream_revision(stream)
            .map(|r| r.next())
            .unwrap_or_default();
        let mut committed = Vec::with_capacity(count);

        for event in events {
            let index = state.log.len();
            state.log.push(EventEnvelope {
                event_id: event.event_id,
                event_type: event.event_type,
                stream: stream.to_string(),
                revision,
                position: Position::new(index as u64),
                timestamp,
                data: event.data,
                metadata: event.metadata,
            });
            state
                .streams
                .entry(stream.to_string())
                .or_default()
                .push(index);
            committed.push(index);
            revision = revision.next();
        }

        let result = state
            .log
            .last()
            .map(|last| WriteResult {
                next_revision: last.revision,
                position: last.position,
            })
            .ok_or_else(|| EventStoreError::InvalidAppend("nothing was written".to_string()))?;

        state.notify(stream, &committed);

        metrics::counter!("event_store_appends_total", "stream" => stream.to_string())
            .increment(1);
        tracing::debug!(
            stream,
            count,
            revision = %result.next_revision,
            position = %result.position,
            "events appended"
        );

        Ok(result)
    }

    async fn read_stream(&self, stream: &str) -> Result<Vec<EventEnvelope>> {
        let state = self.state.read().await;
        let events: Vec<EventEnvelope> = state
            .streams
            .get(stream)
            .map(|indices| indices.iter().map(|&i| state.log[i].clone()).collect())
            .unwrap_or_default();
        Ok(events)
    }

    async fn read_all_from(&self, from: Position) -> Result<Vec<EventEnvelope>> {
        let state = self.state.read().await;
        Ok(state
            .log
            .iter()
            .skip(from.as_u64() as usize)
            .cloned()
            .collect())
    }

    async fn stream_revision(&self, stream: &str) -> Result<Option<Revision>> {
        Ok(self.state.read().await.stream_revision(stream))
    }

    async fn subscribe_to_stream(
        &self,
        stream: &str,
        options: SubscribeOptions,
    ) -> Result<Subscription> {
        let (sender, subscription) = Subscription::channel(stream);

        // Registered under the write lock: every append committed after this
        // point reaches the new subscriber, nothing before it does.
        let mut state = self.state.write().await;
        state.subscribers.push(StreamSubscriber {
            stream: stream.to_string(),
            resolve_link_tos: options.resolve_link_tos,
            sender,
        });

        tracing::debug!(
            stream,
            resolve_link_tos = options.resolve_link_tos,
            "subscription opened"
        );

        Ok(subscription)
    }
}
