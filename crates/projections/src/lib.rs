//! Continuous projections over event categories.
//!
//! - [`Projection`] trait: a pure fold over one stream category, partitioned by stream
//! - [`InventoryProjection`] folding `inventory-<id>` streams into [`InventoryState`]
//! - [`ProjectionEngine`] serving per-partition results and statistics through
//!   [`ProjectionQueries`]

pub mod engine;
pub mod error;
pub mod inventory;
pub mod projection;

pub use engine::{ProjectionEngine, ProjectionQueries, ProjectionStats, ProjectionStatus};
pub use error::{ProjectionError, Result};
pub use inventory::{InventoryProjection, InventoryState};
pub use projection::{Projection, ProjectionPosition};
