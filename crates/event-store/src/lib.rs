//! Stream-oriented event store.
//!
//! Provides the append/read/subscribe contract the process manager relies
//! on, plus an in-memory implementation:
//! - [`EventStore`] trait with per-stream revisions and a global commit order
//! - [`Subscription`] for ordered delivery, with optional link resolution
//! - [`InMemoryEventStore`] for tests and local runs

pub mod error;
pub mod event;
pub mod memory;
pub mod store;
pub mod subscription;

pub use error::{EventStoreError, Result};
pub use event::{
    EventData, EventEnvelope, EventId, LINK_EVENT_TYPE, Position, ResolvedEvent, Revision,
    category_of,
};
pub use memory::InMemoryEventStore;
pub use store::{EventStore, EventStoreExt, SubscribeOptions, WriteResult};
pub use subscription::Subscription;
