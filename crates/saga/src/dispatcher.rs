//! Routes delivered commands to their handler.

use domain::InventoryCommand;
use event_store::{EventStore, ResolvedEvent};
use projections::ProjectionQueries;

use crate::Result;
use crate::handlers::{CheckHandlers, Outcome};

/// What became of one delivered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Handled(Outcome),
    /// The command type is not one this process manager answers.
    Ignored,
}

/// Selects a handler by command type.
#[derive(Clone)]
pub struct Dispatcher<S, Q> {
    handlers: CheckHandlers<S, Q>,
}

impl<S: EventStore, Q: ProjectionQueries> Dispatcher<S, Q> {
    pub fn new(handlers: CheckHandlers<S, Q>) -> Self {
        Self { handlers }
    }

    /// Handles one delivered command.
    ///
    /// Unknown types are ignored. A known type with a malformed payload is
    /// an error and produces no event.
    #[tracing::instrument(
        skip(self, delivery),
        fields(
            command_type = %delivery.event.event_type,
            revision = %delivery.original_revision(),
            correlation_id = tracing::field::Empty,
        )
    )]
    pub async fn dispatch(&self, delivery: &ResolvedEvent) -> Result<Dispatch> {
        let command = &delivery.event;
        if let Some(correlation_id) = command.metadata.correlation_id() {
            tracing::Span::current().record("correlation_id", correlation_id);
        }

        let Some(parsed) = InventoryCommand::parse(&command.event_type, &command.data)? else {
            tracing::debug!("ignoring command");
            return Ok(Dispatch::Ignored);
        };

        let outcome = match &parsed {
            InventoryCommand::CheckCapacityAvailable(check) => {
                self.handlers.check_capacity(check, &command.metadata).await?
            }
            InventoryCommand::CheckFunctionable(check) => {
                self.handlers.check_functionable(check, &command.metadata).await?
            }
        };
        Ok(Dispatch::Handled(outcome))
    }
}
