//! Inventory lifecycle events.
//!
//! These are written to `inventory-<id>` streams by upstream services and
//! folded by the inventory projection.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::event::DomainEvent;

/// Events in the life of a single inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InventoryEvent {
    /// Inventory was created.
    Created(InventoryCreatedData),

    /// Items were added.
    ItemsAdded(ItemsAddedData),

    /// One item was removed.
    ItemRemoved(ItemRemovedData),

    /// Capacity was set.
    CapacityUpdated(CapacityUpdatedData),

    /// Functionability was switched on or off.
    FunctionabilityUpdated(FunctionabilityUpdatedData),
}

impl InventoryEvent {
    pub const CREATED: &'static str = "inventory.created";
    pub const ITEMS_ADDED: &'static str = "inventory.itemsAdded";
    pub const ITEM_REMOVED: &'static str = "inventory.itemRemoved";
    pub const CAPACITY_UPDATED: &'static str = "inventory.capacityUpdated";
    /// Misspelled type still emitted by older producers.
    pub const CAPACITY_UPDATED_LEGACY: &'static str = "inventory.capicityUpdated";
    pub const FUNCTIONABILITY_UPDATED: &'static str = "inventory.functionabilityUpdated";

    /// Parses a lifecycle event. Unknown types yield `Ok(None)`.
    pub fn parse(event_type: &str, data: &serde_json::Value) -> Result<Option<Self>, DomainError> {
        fn payload<T: serde::de::DeserializeOwned>(
            event_type: &str,
            data: &serde_json::Value,
        ) -> Result<T, DomainError> {
            serde_json::from_value(data.clone()).map_err(|e| DomainError::malformed(event_type, e))
        }

        let event = match event_type {
            Self::CREATED => InventoryEvent::Created(payload(event_type, data)?),
            Self::ITEMS_ADDED => InventoryEvent::ItemsAdded(payload(event_type, data)?),
            // Removal carries no meaningful payload.
            Self::ITEM_REMOVED => InventoryEvent::ItemRemoved(ItemRemovedData {}),
            Self::CAPACITY_UPDATED | Self::CAPACITY_UPDATED_LEGACY => {
                InventoryEvent::CapacityUpdated(payload(event_type, data)?)
            }
            Self::FUNCTIONABILITY_UPDATED => {
                InventoryEvent::FunctionabilityUpdated(payload(event_type, data)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    /// Creates a Created event.
    pub fn created(id: impl Into<String>) -> Self {
        InventoryEvent::Created(InventoryCreatedData { id: id.into() })
    }

    /// Creates an ItemsAdded event.
    pub fn items_added(count: i64) -> Self {
        InventoryEvent::ItemsAdded(ItemsAddedData { count })
    }

    /// Creates an ItemRemoved event.
    pub fn item_removed() -> Self {
        InventoryEvent::ItemRemoved(ItemRemovedData {})
    }

    /// Creates a CapacityUpdated event.
    pub fn capacity_updated(capacity: i64) -> Self {
        InventoryEvent::CapacityUpdated(CapacityUpdatedData { capacity })
    }

    /// Creates a FunctionabilityUpdated event.
    pub fn functionability_updated(functionable: bool) -> Self {
        InventoryEvent::FunctionabilityUpdated(FunctionabilityUpdatedData { functionable })
    }
}

impl DomainEvent for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::Created(_) => Self::CREATED,
            InventoryEvent::ItemsAdded(_) => Self::ITEMS_ADDED,
            InventoryEvent::ItemRemoved(_) => Self::ITEM_REMOVED,
            InventoryEvent::CapacityUpdated(_) => Self::CAPACITY_UPDATED,
            InventoryEvent::FunctionabilityUpdated(_) => Self::FUNCTIONABILITY_UPDATED,
        }
    }
}

/// Data for the created event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryCreatedData {
    pub id: String,
}

/// Data for the items added event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsAddedData {
    pub count: i64,
}

/// Data for the item removed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemovedData {}

/// Data for the capacity updated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityUpdatedData {
    pub capacity: i64,
}

/// Data for the functionability updated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionabilityUpdatedData {
    pub functionable: bool,
}
