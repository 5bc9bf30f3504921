//! Process manager for inventory checks.
//!
//! Commands arrive on `command-ic`. Each one is answered from the
//! `inventory-ic-state` projection with exactly one event: a result on `ic`
//! or an `ic.inventoryNotFound` exception on `exception-ic`.
//!
//! The pieces, leaves first:
//! 1. [`StateQueryClient`] reads projection state
//! 2. [`EventEmitter`] appends result events
//! 3. [`CheckHandlers`] decide the answer to each check
//! 4. [`Dispatcher`] routes a command to its handler
//! 5. [`CommandConsumer`] feeds the dispatcher from the command stream

pub mod bootstrap;
pub mod consumer;
pub mod dispatcher;
pub mod emitter;
pub mod error;
pub mod handlers;
pub mod query;
pub mod streams;

pub use bootstrap::{Bootstrap, ensure_projection};
pub use consumer::{CommandConsumer, ConsumerStats};
pub use dispatcher::{Dispatch, Dispatcher};
pub use emitter::EventEmitter;
pub use error::{Result, SagaError};
pub use handlers::{CheckHandlers, Lookup, Outcome};
pub use query::{QueryError, StateQueryClient};
pub use streams::{COMMAND_STREAM, EXCEPTION_STREAM, INVENTORY_STATE_PROJECTION, RESULT_STREAM};
