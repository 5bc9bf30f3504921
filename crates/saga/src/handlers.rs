//! Handlers answering the two inventory checks.
//!
//! Each handler queries the inventory's state, decides between a result and
//! a not-found exception, and appends exactly one event carrying the
//! command's metadata.

use common::{EntityId, Metadata};
use domain::{CheckCapacityAvailable, CheckFunctionable, InventoryCheckEvent};
use event_store::{EventStore, WriteResult};
use projections::{InventoryState, ProjectionQueries};

use crate::Result;
use crate::emitter::EventEmitter;
use crate::query::{QueryError, StateQueryClient};
use crate::streams::{EXCEPTION_STREAM, RESULT_STREAM};

/// What the state query found for an inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The inventory exists.
    Found(InventoryState),
    /// The projection itself is missing.
    NotFoundProjection(QueryError),
    /// The projection never saw this inventory being created.
    NotFoundEntity,
}

/// The event a handler appended and where it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub stream: &'static str,
    pub event: InventoryCheckEvent,
    pub write: WriteResult,
}

/// Query and append collaborators shared by the check handlers.
#[derive(Clone)]
pub struct CheckHandlers<S, Q> {
    queries: StateQueryClient<Q>,
    emitter: EventEmitter<S>,
}

impl<S: EventStore, Q: ProjectionQueries> CheckHandlers<S, Q> {
    pub fn new(queries: StateQueryClient<Q>, emitter: EventEmitter<S>) -> Self {
        Self { queries, emitter }
    }

    /// Looks an inventory up. Query failures other than a missing
    /// projection are returned as errors.
    pub async fn lookup(&self, entity_id: &EntityId) -> Result<Lookup> {
        match self.queries.get_entity_state(entity_id).await {
            Ok(state) if state.exists() => Ok(Lookup::Found(state)),
            Ok(_) => Ok(Lookup::NotFoundEntity),
            Err(error) if error.is_not_found() => Ok(Lookup::NotFoundProjection(error)),
            Err(error) => Err(error.into()),
        }
    }

    /// Answers how many items the inventory would hold after the addition.
    #[tracing::instrument(skip(self, command, metadata), fields(entity_id = %command.entity_id))]
    pub async fn check_capacity(
        &self,
        command: &CheckCapacityAvailable,
        metadata: &Metadata,
    ) -> Result<Outcome> {
        let lookup = self.lookup(&command.entity_id).await?;
        let event = decide(&command.entity_id, lookup, |state| {
            InventoryCheckEvent::capacity_available_checked(
                state.item_count.saturating_add(command.new_item_count),
            )
        });
        self.emit(event, metadata).await
    }

    /// Answers whether the inventory is functionable.
    #[tracing::instrument(skip(self, command, metadata), fields(entity_id = %command.entity_id))]
    pub async fn check_functionable(
        &self,
        command: &CheckFunctionable,
        metadata: &Metadata,
    ) -> Result<Outcome> {
        let lookup = self.lookup(&command.entity_id).await?;
        let event = decide(&command.entity_id, lookup, |state| {
            InventoryCheckEvent::functionability_checked(state.functionable)
        });
        self.emit(event, metadata).await
    }

    async fn emit(&self, event: InventoryCheckEvent, metadata: &Metadata) -> Result<Outcome> {
        let (stream, outcome) = match &event {
            InventoryCheckEvent::CapacityAvailableChecked(_) => (RESULT_STREAM, "available"),
            InventoryCheckEvent::FunctionabilityChecked(_) => (RESULT_STREAM, "functionable"),
            InventoryCheckEvent::InventoryNotFound(_) => (EXCEPTION_STREAM, "not_found"),
        };

        let write = self.emitter.emit(stream, &event, metadata.clone()).await?;
        metrics::counter!("inventory_checks_total", "outcome" => outcome).increment(1);
        tracing::info!(stream, outcome, revision = %write.next_revision, "check answered");

        Ok(Outcome {
            stream,
            event,
            write,
        })
    }
}

fn decide(
    entity_id: &EntityId,
    lookup: Lookup,
    found: impl FnOnce(InventoryState) -> InventoryCheckEvent,
) -> InventoryCheckEvent {
    match lookup {
        Lookup::Found(state) => found(state),
        Lookup::NotFoundProjection(error) => InventoryCheckEvent::inventory_not_found_with_error(
            entity_id.clone(),
            error.code,
            error.message,
        ),
        Lookup::NotFoundEntity => InventoryCheckEvent::inventory_not_found(entity_id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing(item_count: i64, functionable: bool) -> Lookup {
        Lookup::Found(InventoryState {
            id: Some("1".to_string()),
            functionable,
            item_count,
            capacity: 100,
        })
    }

    #[test]
    fn found_state_is_answered() {
        let id = EntityId::new("1");
        let event = decide(&id, existing(10, true), |state| {
            InventoryCheckEvent::capacity_available_checked(state.item_count + 5)
        });
        assert_eq!(event, InventoryCheckEvent::capacity_available_checked(15));
    }

    #[test]
    fn missing_entity_has_no_error_fields() {
        let id = EntityId::new("1");
        let event = decide(&id, Lookup::NotFoundEntity, |_| unreachable!());
        assert_eq!(event, InventoryCheckEvent::inventory_not_found(id));
    }

    #[test]
    fn missing_projection_carries_query_error() {
        let id = EntityId::new("1");
        let lookup = Lookup::NotFoundProjection(QueryError::new(2, "gone"));
        let event = decide(&id, lookup, |_| unreachable!());
        assert_eq!(
            event,
            InventoryCheckEvent::inventory_not_found_with_error(id, 2, Some("gone".to_string()))
        );
    }
}
