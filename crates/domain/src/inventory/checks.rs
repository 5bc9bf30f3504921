//! Results and exceptions emitted by the inventory checks.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::event::DomainEvent;

/// Events produced in answer to an inventory check command.
///
/// Both successful checks share one wire discriminator; they are told apart
/// by the field their payload carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InventoryCheckEvent {
    /// Capacity check succeeded.
    CapacityAvailableChecked(CapacityAvailableCheckedData),

    /// Functionability check succeeded.
    FunctionabilityChecked(FunctionabilityCheckedData),

    /// The inventory does not exist, or its projection is missing.
    InventoryNotFound(InventoryNotFoundData),
}

impl InventoryCheckEvent {
    pub const CAPACITY_AVAILABLE_CHECKED: &'static str = "ic.inventoryCapacityAvailableChecked";
    pub const INVENTORY_NOT_FOUND: &'static str = "ic.inventoryNotFound";

    /// Creates a capacity result.
    pub fn capacity_available_checked(available: i64) -> Self {
        InventoryCheckEvent::CapacityAvailableChecked(CapacityAvailableCheckedData { available })
    }

    /// Creates a functionability result.
    pub fn functionability_checked(functionable: bool) -> Self {
        InventoryCheckEvent::FunctionabilityChecked(FunctionabilityCheckedData { functionable })
    }

    /// Creates a not-found exception for an inventory that was never created.
    pub fn inventory_not_found(inventory_id: EntityId) -> Self {
        InventoryCheckEvent::InventoryNotFound(InventoryNotFoundData {
            code: None,
            message: None,
            inventory_id,
        })
    }

    /// Creates a not-found exception carrying the failed query's error.
    pub fn inventory_not_found_with_error(
        inventory_id: EntityId,
        code: i32,
        message: Option<String>,
    ) -> Self {
        InventoryCheckEvent::InventoryNotFound(InventoryNotFoundData {
            code: Some(code),
            message,
            inventory_id,
        })
    }
}

impl DomainEvent for InventoryCheckEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryCheckEvent::CapacityAvailableChecked(_)
            | InventoryCheckEvent::FunctionabilityChecked(_) => Self::CAPACITY_AVAILABLE_CHECKED,
            InventoryCheckEvent::InventoryNotFound(_) => Self::INVENTORY_NOT_FOUND,
        }
    }
}

/// Data for a capacity result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityAvailableCheckedData {
    /// Item count the inventory would hold after the requested addition.
    pub available: i64,
}

/// Data for a functionability result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionabilityCheckedData {
    pub functionable: bool,
}

/// Data for the not-found exception.
///
/// `code` and `message` are only present when the projection query itself
/// failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryNotFoundData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub inventory_id: EntityId,
}
