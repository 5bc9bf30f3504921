//! Per-inventory state folded from `inventory-<id>` streams.

use domain::{INVENTORY_CATEGORY, InventoryEvent};
use event_store::EventEnvelope;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::projection::Projection;

/// Current state of one inventory as seen by the checks.
///
/// A partition that never saw `inventory.created` has no `id`; queries
/// return it as a sentinel meaning "does not exist".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub functionable: bool,

    #[serde(default)]
    pub item_count: i64,

    #[serde(default)]
    pub capacity: i64,
}

impl InventoryState {
    /// Returns true once the inventory has been created.
    pub fn exists(&self) -> bool {
        self.id.is_some()
    }

    /// Applies one lifecycle event.
    pub fn apply(&mut self, event: &InventoryEvent) {
        match event {
            InventoryEvent::Created(data) => self.id = Some(data.id.clone()),
            InventoryEvent::ItemsAdded(data) => {
                self.item_count = self.item_count.saturating_add(data.count);
            }
            InventoryEvent::ItemRemoved(_) => {
                self.item_count = self.item_count.saturating_sub(1);
            }
            InventoryEvent::CapacityUpdated(data) => self.capacity = data.capacity,
            InventoryEvent::FunctionabilityUpdated(data) => self.functionable = data.functionable,
        }
    }
}

/// Projection folding the `inventory` category into [`InventoryState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryProjection;

impl Projection for InventoryProjection {
    fn category(&self) -> &str {
        INVENTORY_CATEGORY
    }

    fn init(&self) -> Result<Value> {
        Ok(serde_json::to_value(InventoryState::default())?)
    }

    fn apply(&self, state: Value, event: &EventEnvelope) -> Result<Value> {
        let Some(event) = InventoryEvent::parse(&event.event_type, &event.data)? else {
            return Ok(state);
        };

        let mut state: InventoryState = serde_json::from_value(state)?;
        state.apply(&event);
        Ok(serde_json::to_value(state)?)
    }
}
