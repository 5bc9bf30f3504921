//! Service-level error types.

use saga::SagaError;
use thiserror::Error;

/// Errors that stop the service from starting or shutting down cleanly.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The process manager could not be started.
    #[error("Process manager startup failed: {0}")]
    Startup(#[from] SagaError),

    /// The Prometheus recorder could not be installed.
    #[error("Metrics recorder error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// The HTTP listener could not be bound or failed while serving.
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    /// The consumer task panicked or was cancelled.
    #[error("Consumer task failed: {0}")]
    Consumer(#[from] tokio::task::JoinError),
}

/// Convenience type alias for service results.
pub type Result<T> = std::result::Result<T, ServiceError>;
