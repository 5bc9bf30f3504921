//! Shared types used across the workspace.

pub mod metadata;
pub mod types;

pub use metadata::{CORRELATION_ID_KEY, Metadata};
pub use types::EntityId;
