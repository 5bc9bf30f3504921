//! Point reads of projection state.

use std::sync::Arc;

use common::EntityId;
use domain::inventory_stream;
use projections::{
    InventoryState, Projection, ProjectionError, ProjectionQueries, ProjectionStats,
};
use thiserror::Error;

/// A failed projection query, as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("query failed with code {code}: {}", display_message(.message))]
pub struct QueryError {
    pub code: i32,
    pub message: Option<String>,
}

fn display_message(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("no message")
}

impl QueryError {
    /// The projection itself does not exist.
    pub const NOT_FOUND: i32 = ProjectionError::NOT_FOUND;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    /// Returns true when the projection is missing, as opposed to any other failure.
    pub fn is_not_found(&self) -> bool {
        self.code == Self::NOT_FOUND
    }
}

impl From<ProjectionError> for QueryError {
    fn from(error: ProjectionError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

/// Reads inventory state from a named projection.
#[derive(Clone)]
pub struct StateQueryClient<Q> {
    queries: Q,
    projection: String,
}

impl<Q: ProjectionQueries> StateQueryClient<Q> {
    pub fn new(queries: Q, projection: impl Into<String>) -> Self {
        Self {
            queries,
            projection: projection.into(),
        }
    }

    pub fn projection_name(&self) -> &str {
        &self.projection
    }

    /// Returns the current state of one inventory.
    ///
    /// An inventory that was never created comes back as a state without
    /// `id`; only engine failures are errors.
    #[tracing::instrument(skip(self), fields(projection = %self.projection))]
    pub async fn get_entity_state(&self, entity_id: &EntityId) -> Result<InventoryState, QueryError> {
        let partition = inventory_stream(entity_id);
        let value = self.queries.get_result(&self.projection, &partition).await?;
        serde_json::from_value(value)
            .map_err(|e| QueryError::new(ProjectionError::SERIALIZATION, e.to_string()))
    }

    /// Returns the projection's statistics.
    #[tracing::instrument(skip(self), fields(projection = %self.projection))]
    pub async fn get_projection_status(&self) -> Result<ProjectionStats, QueryError> {
        Ok(self.queries.get_statistics(&self.projection).await?)
    }

    /// Registers `projection` as a continuous projection under this client's name.
    pub async fn create_projection(&self, projection: Arc<dyn Projection>) -> Result<(), QueryError> {
        Ok(self
            .queries
            .create_continuous(&self.projection, projection)
            .await?)
    }
}
