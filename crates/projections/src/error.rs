//! Projection error types.

use thiserror::Error;

/// Errors that can occur while managing or querying projections.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// No projection is registered under this name.
    #[error("Projection not found: {0}")]
    NotFound(String),

    /// A projection is already registered under this name.
    #[error("Projection already exists: {0}")]
    AlreadyExists(String),

    /// The projection definition cannot be registered.
    #[error("Invalid projection definition: {0}")]
    InvalidDefinition(String),

    /// An error occurred in the event store.
    #[error("Event store error: {0}")]
    EventStore(#[from] event_store::EventStoreError),

    /// The engine cannot serve requests right now.
    #[error("Projection engine unavailable: {0}")]
    Unavailable(String),

    /// Failed to (de)serialize projection state.
    #[error("State serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An event in the category could not be decoded.
    #[error("Event decoding error: {0}")]
    Domain(#[from] domain::DomainError),
}

impl ProjectionError {
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_DEFINITION: i32 = 3;
    pub const ALREADY_EXISTS: i32 = 6;
    pub const SERIALIZATION: i32 = 13;
    pub const UNAVAILABLE: i32 = 14;

    /// Numeric status code reported to query clients.
    pub fn code(&self) -> i32 {
        match self {
            ProjectionError::NotFound(_) => Self::NOT_FOUND,
            ProjectionError::InvalidDefinition(_) => Self::INVALID_DEFINITION,
            ProjectionError::AlreadyExists(_) => Self::ALREADY_EXISTS,
            ProjectionError::Serialization(_) | ProjectionError::Domain(_) => Self::SERIALIZATION,
            ProjectionError::EventStore(_) | ProjectionError::Unavailable(_) => Self::UNAVAILABLE,
        }
    }
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_code_two() {
        assert_eq!(ProjectionError::NotFound("x".into()).code(), 2);
    }

    #[test]
    fn store_failures_map_to_unavailable() {
        let err: ProjectionError =
            event_store::EventStoreError::Unavailable("down".into()).into();
        assert_eq!(err.code(), ProjectionError::UNAVAILABLE);
        assert_eq!(
            ProjectionError::AlreadyExists("x".into()).code(),
            ProjectionError::ALREADY_EXISTS
        );
    }
}
