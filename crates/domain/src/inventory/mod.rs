//! Inventory commands and events.

mod checks;
mod commands;
mod events;

pub use checks::{
    CapacityAvailableCheckedData, FunctionabilityCheckedData, InventoryCheckEvent,
    InventoryNotFoundData,
};
pub use commands::{CheckCapacityAvailable, CheckFunctionable, InventoryCommand};
pub use events::{
    CapacityUpdatedData, FunctionabilityUpdatedData, InventoryCreatedData, InventoryEvent,
    ItemRemovedData, ItemsAddedData,
};

use common::EntityId;

/// Category of the per-entity lifecycle streams.
pub const INVENTORY_CATEGORY: &str = "inventory";

/// Returns the lifecycle stream of an inventory entity.
pub fn inventory_stream(id: &EntityId) -> String {
    format!("{INVENTORY_CATEGORY}-{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_name_uses_category_prefix() {
        let stream = inventory_stream(&EntityId::new("123"));
        assert_eq!(stream, "inventory-123");
        assert_eq!(event_store::category_of(&stream), INVENTORY_CATEGORY);
    }
}
