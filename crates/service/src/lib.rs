//! Inventory check process manager service.
//!
//! Wires the command consumer to an event store and projection engine, and
//! serves health and Prometheus metrics over HTTP.

pub mod config;
pub mod error;
pub mod routes;

use axum::Router;
use axum::routing::get;
use event_store::EventStore;
use metrics_exporter_prometheus::PrometheusHandle;
use projections::ProjectionQueries;
use saga::{
    CheckHandlers, CommandConsumer, ConsumerStats, Dispatcher, EventEmitter, StateQueryClient,
    ensure_projection,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

pub use config::{Config, LogFormat};
pub use error::{Result, ServiceError};

/// Creates the Axum application router with the operational routes.
pub fn create_app(metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
}

/// A command consumer running on its own task.
pub struct ProcessManager {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<ConsumerStats>,
}

impl ProcessManager {
    /// Ensures the projection exists, subscribes to the command stream and
    /// starts consuming.
    pub async fn start<S, Q>(store: S, queries: StateQueryClient<Q>) -> Result<Self>
    where
        S: EventStore + Clone + 'static,
        Q: ProjectionQueries + 'static,
    {
        let bootstrap = ensure_projection(&queries).await?;
        tracing::info!(?bootstrap, projection = queries.projection_name(), "projection ready");

        let handlers = CheckHandlers::new(queries, EventEmitter::new(store.clone()));
        let consumer = CommandConsumer::subscribe(&store, Dispatcher::new(handlers)).await?;

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(consumer.run(shutdown_rx));
        Ok(Self { shutdown, handle })
    }

    /// Signals the consumer to stop and waits for it.
    pub async fn stop(self) -> Result<ConsumerStats> {
        if self.shutdown.send(true).is_err() {
            tracing::debug!("consumer already stopped");
        }
        Ok(self.handle.await?)
    }
}
