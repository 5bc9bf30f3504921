//! Domain layer for the inventory process manager.
//!
//! This crate provides the typed vocabulary exchanged over streams:
//! - [`DomainEvent`] trait for anything written as an event
//! - [`InventoryCommand`] with ingress validation
//! - [`InventoryEvent`] lifecycle events folded by the projection
//! - [`InventoryCheckEvent`] results and exceptions emitted by the handlers

pub mod error;
pub mod event;
pub mod inventory;

pub use error::DomainError;
pub use event::DomainEvent;
pub use inventory::{
    CapacityAvailableCheckedData, CheckCapacityAvailable, CheckFunctionable,
    FunctionabilityCheckedData, INVENTORY_CATEGORY, InventoryCheckEvent, InventoryCommand,
    InventoryEvent, InventoryNotFoundData, inventory_stream,
};
