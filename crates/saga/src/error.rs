//! Process manager error types.

use domain::DomainError;
use event_store::EventStoreError;
use thiserror::Error;

use crate::query::QueryError;

/// Errors that can occur while handling commands or starting up.
#[derive(Debug, Error)]
pub enum SagaError {
    /// A recognized command carried a payload that violates its schema.
    #[error("Malformed command: {0}")]
    MalformedCommand(#[from] DomainError),

    /// Projection state could not be read.
    #[error("State query failed: {0}")]
    Query(#[from] QueryError),

    /// The projection could not be verified or registered at startup.
    #[error("Projection setup failed for {projection}: {source}")]
    ProjectionSetup {
        projection: String,
        #[source]
        source: QueryError,
    },

    /// Event store error.
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for process manager results.
pub type Result<T> = std::result::Result<T, SagaError>;
