//! Startup check that the inventory projection exists.

use std::sync::Arc;

use projections::{InventoryProjection, ProjectionError, ProjectionQueries};

use crate::query::StateQueryClient;
use crate::{Result, SagaError};

/// What startup found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    /// The projection was already registered.
    Existing,
    /// The projection was missing and has been created.
    Created,
}

/// Registers the inventory projection unless it already exists.
#[tracing::instrument(skip(client), fields(projection = client.projection_name()))]
pub async fn ensure_projection<Q: ProjectionQueries>(
    client: &StateQueryClient<Q>,
) -> Result<Bootstrap> {
    let setup_failed = |source| SagaError::ProjectionSetup {
        projection: client.projection_name().to_string(),
        source,
    };

    match client.get_projection_status().await {
        Ok(stats) => {
            tracing::info!(
                position = %stats.position,
                partitions = stats.partitions,
                "projection already running"
            );
            Ok(Bootstrap::Existing)
        }
        Err(error) if error.is_not_found() => {
            match client.create_projection(Arc::new(InventoryProjection)).await {
                Ok(()) => {
                    tracing::info!("projection created");
                    Ok(Bootstrap::Created)
                }
                // Registered concurrently by another instance.
                Err(error) if error.code == ProjectionError::ALREADY_EXISTS => {
                    Ok(Bootstrap::Existing)
                }
                Err(error) => Err(setup_failed(error)),
            }
        }
        Err(error) => Err(setup_failed(error)),
    }
}
