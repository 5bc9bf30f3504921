//! In-memory projection engine.
//!
//! Continuous projections fold the global log in commit order. Each query
//! first catches the projection up with the store, so a query observes every
//! event committed before it was issued.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use event_store::{EventEnvelope, EventStore};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::projection::{Projection, ProjectionPosition};
use crate::{ProjectionError, Result};

/// Lifecycle status of a registered projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionStatus {
    Running,
}

/// Statistics reported for a registered projection.
#[derive(Debug, Clone)]
pub struct ProjectionStats {
    pub name: String,
    pub category: String,
    pub status: ProjectionStatus,
    pub position: ProjectionPosition,
    pub partitions: usize,
    pub created_at: DateTime<Utc>,
}

/// Management and query surface of a projection engine.
#[async_trait]
pub trait ProjectionQueries: Send + Sync {
    /// Registers a continuous projection under `name`.
    async fn create_continuous(&self, name: &str, projection: Arc<dyn Projection>) -> Result<()>;

    /// Returns the state of one partition.
    ///
    /// A partition that has seen no events returns the projection's initial state.
    async fn get_result(&self, name: &str, partition: &str) -> Result<Value>;

    /// Returns statistics for a projection.
    async fn get_statistics(&self, name: &str) -> Result<ProjectionStats>;
}

struct RegisteredProjection {
    projection: Arc<dyn Projection>,
    partitions: HashMap<String, Value>,
    position: ProjectionPosition,
    created_at: DateTime<Utc>,
}

impl RegisteredProjection {
    fn fold(&mut self, name: &str, event: &EventEnvelope) {
        if event.is_link() || event.category() != self.projection.category() {
            self.position = self.position.skip(event.position);
            return;
        }

        let folded = self
            .partitions
            .get(&event.stream)
            .cloned()
            .map_or_else(|| self.projection.init(), Ok)
            .and_then(|state| self.projection.apply(state, event));

        match folded {
            Ok(state) => {
                self.partitions.insert(event.stream.clone(), state);
                self.position = self.position.advance(event.position);
                metrics::counter!("projection_events_folded_total", "projection" => name.to_string())
                    .increment(1);
            }
            Err(error) => {
                tracing::warn!(
                    projection = name,
                    stream = %event.stream,
                    event_type = %event.event_type,
                    %error,
                    "skipping event that could not be folded"
                );
                self.position = self.position.skip(event.position);
            }
        }
    }

    fn stats(&self, name: &str) -> ProjectionStats {
        ProjectionStats {
            name: name.to_string(),
            category: self.projection.category().to_string(),
            status: ProjectionStatus::Running,
            position: self.position,
            partitions: self.partitions.len(),
            created_at: self.created_at,
        }
    }
}

#[derive(Default)]
struct EngineState {
    projections: HashMap<String, RegisteredProjection>,
    fail_queries: bool,
}

impl EngineState {
    fn check_available(&self) -> Result<()> {
        if self.fail_queries {
            return Err(ProjectionError::Unavailable(
                "simulated engine failure".to_string(),
            ));
        }
        Ok(())
    }
}

/// Projection engine reading from an [`EventStore`].
#[derive(Clone)]
pub struct ProjectionEngine<S: EventStore> {
    store: S,
    state: Arc<RwLock<EngineState>>,
}

impl<S: EventStore> ProjectionEngine<S> {
    /// Creates an engine with no registered projections.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: Arc::new(RwLock::new(EngineState::default())),
        }
    }

    /// Returns the number of registered projections.
    pub async fn projection_count(&self) -> usize {
        self.state.read().await.projections.len()
    }

    /// Makes every subsequent request fail as if the engine were down.
    pub async fn set_fail_on_query(&self, fail: bool) {
        self.state.write().await.fail_queries = fail;
    }

    /// Folds every event committed since the projection's last catch-up.
    #[tracing::instrument(skip(self))]
    pub async fn catch_up(&self, name: &str) -> Result<ProjectionPosition> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let registered = self.caught_up(&mut state, name).await?;
        Ok(registered.position)
    }

    async fn caught_up<'a>(
        &self,
        state: &'a mut EngineState,
        name: &str,
    ) -> Result<&'a mut RegisteredProjection> {
        let registered = state
            .projections
            .get_mut(name)
            .ok_or_else(|| ProjectionError::NotFound(name.to_string()))?;

        let events = self.store.read_all_from(registered.position.next).await?;
        for event in &events {
            registered.fold(name, event);
        }
        if !events.is_empty() {
            tracing::debug!(
                projection = name,
                read = events.len(),
                position = %registered.position,
                "projection caught up"
            );
        }

        Ok(registered)
    }
}

#[async_trait]
impl<S: EventStore> ProjectionQueries for ProjectionEngine<S> {
    #[tracing::instrument(skip(self, projection))]
    async fn create_continuous(&self, name: &str, projection: Arc<dyn Projection>) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ProjectionError::InvalidDefinition(
                "projection name must not be empty".to_string(),
            ));
        }
        if projection.category().trim().is_empty() {
            return Err(ProjectionError::InvalidDefinition(format!(
                "projection {name} has no source category"
            )));
        }

        let mut state = self.state.write().await;
        state.check_available()?;
        if state.projections.contains_key(name) {
            return Err(ProjectionError::AlreadyExists(name.to_string()));
        }

        tracing::info!(category = projection.category(), "continuous projection created");
        state.projections.insert(
            name.to_string(),
            RegisteredProjection {
                projection,
                partitions: HashMap::new(),
                position: ProjectionPosition::zero(),
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_result(&self, name: &str, partition: &str) -> Result<Value> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let registered = self.caught_up(&mut state, name).await?;

        match registered.partitions.get(partition) {
            Some(value) => Ok(value.clone()),
            None => registered.projection.init(),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get_statistics(&self, name: &str) -> Result<ProjectionStats> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let registered = self.caught_up(&mut state, name).await?;
        Ok(registered.stats(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_store::{EventData, EventStoreExt, InMemoryEventStore};
    use serde_json::json;

    /// Counts events per partition.
    struct CountingProjection;

    impl Projection for CountingProjection {
        fn category(&self) -> &str {
            "counter"
        }

        fn init(&self) -> Result<Value> {
            Ok(json!(0))
        }

        fn apply(&self, state: Value, _event: &EventEnvelope) -> Result<Value> {
            let count = state.as_u64().unwrap_or_default();
            Ok(json!(count + 1))
        }
    }

    async fn engine_with_counter() -> (InMemoryEventStore, ProjectionEngine<InMemoryEventStore>) {
        let store = InMemoryEventStore::new();
        let engine = ProjectionEngine::new(store.clone());
        engine
            .create_continuous("counts", Arc::new(CountingProjection))
            .await
            .unwrap();
        (store, engine)
    }

    async fn append(store: &InMemoryEventStore, stream: &str) {
        store
            .append_event(stream, EventData::raw("tick", json!({})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn folds_only_its_category() {
        let (store, engine) = engine_with_counter().await;
        append(&store, "counter-a").await;
        append(&store, "counter-a").await;
        append(&store, "other-a").await;
        append(&store, "counter-b").await;

        assert_eq!(engine.get_result("counts", "counter-a").await.unwrap(), json!(2));
        assert_eq!(engine.get_result("counts", "counter-b").await.unwrap(), json!(1));

        let stats = engine.get_statistics("counts").await.unwrap();
        assert_eq!(stats.position.events_processed, 3);
        assert_eq!(stats.position.next.as_u64(), 4);
        assert_eq!(stats.partitions, 2);
    }

    #[tokio::test]
    async fn unseen_partition_returns_init() {
        let (_store, engine) = engine_with_counter().await;
        assert_eq!(engine.get_result("counts", "counter-z").await.unwrap(), json!(0));
    }

    #[tokio::test]
    async fn catch_up_does_not_refold() {
        let (store, engine) = engine_with_counter().await;
        append(&store, "counter-a").await;

        engine.catch_up("counts").await.unwrap();
        engine.catch_up("counts").await.unwrap();

        assert_eq!(engine.get_result("counts", "counter-a").await.unwrap(), json!(1));
    }

    #[tokio::test]
    async fn missing_projection_reports_code_two() {
        let engine = ProjectionEngine::new(InMemoryEventStore::new());
        let err = engine.get_statistics("nope").await.unwrap_err();
        assert_eq!(err.code(), ProjectionError::NOT_FOUND);

        let err = engine.get_result("nope", "x").await.unwrap_err();
        assert!(matches!(err, ProjectionError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let (_store, engine) = engine_with_counter().await;
        let err = engine
            .create_continuous("counts", Arc::new(CountingProjection))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProjectionError::ALREADY_EXISTS);
        assert_eq!(engine.projection_count().await, 1);
    }

    #[tokio::test]
    async fn blank_name_is_invalid() {
        let engine = ProjectionEngine::new(InMemoryEventStore::new());
        let err = engine
            .create_continuous(" ", Arc::new(CountingProjection))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProjectionError::INVALID_DEFINITION);
    }

    #[tokio::test]
    async fn simulated_failure_is_unavailable() {
        let (_store, engine) = engine_with_counter().await;
        engine.set_fail_on_query(true).await;

        let err = engine.get_result("counts", "counter-a").await.unwrap_err();
        assert_eq!(err.code(), ProjectionError::UNAVAILABLE);

        engine.set_fail_on_query(false).await;
        assert!(engine.get_result("counts", "counter-a").await.is_ok());
    }
}
