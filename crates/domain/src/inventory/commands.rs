//! Inventory check commands.

use common::{EntityId, Metadata};
use event_store::EventData;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Asks how many items an inventory would hold after adding `new_item_count`.
///
/// The count is signed and taken as given; a negative count is a removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckCapacityAvailable {
    /// The inventory to check. A payload carrying both `entityId` and
    /// `inventoryId` is rejected as a duplicate field.
    #[serde(alias = "inventoryId")]
    pub entity_id: EntityId,

    /// Number of items the caller intends to add.
    pub new_item_count: i64,
}

impl CheckCapacityAvailable {
    pub const TYPE: &'static str = "ic.checkIsInventoryCapacityAvailable";

    pub fn new(entity_id: impl Into<EntityId>, new_item_count: i64) -> Self {
        Self {
            entity_id: entity_id.into(),
            new_item_count,
        }
    }
}

/// Asks whether an inventory is functionable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckFunctionable {
    /// The inventory to check.
    #[serde(alias = "inventoryId")]
    pub entity_id: EntityId,
}

impl CheckFunctionable {
    // Wire name kept as published by producers.
    pub const TYPE: &'static str = "ic.checkIsInventoryFuncationable";

    pub fn new(entity_id: impl Into<EntityId>) -> Self {
        Self {
            entity_id: entity_id.into(),
        }
    }
}

/// Commands consumed from the command stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InventoryCommand {
    CheckCapacityAvailable(CheckCapacityAvailable),
    CheckFunctionable(CheckFunctionable),
}

impl InventoryCommand {
    /// Parses a command from its type discriminator and payload.
    ///
    /// Returns `Ok(None)` for types this process manager does not handle,
    /// and an error when a known type carries a payload that violates its
    /// schema.
    pub fn parse(command_type: &str, data: &serde_json::Value) -> Result<Option<Self>, DomainError> {
        let command = match command_type {
            CheckCapacityAvailable::TYPE => {
                let command: CheckCapacityAvailable = serde_json::from_value(data.clone())
                    .map_err(|e| DomainError::malformed(command_type, e))?;
                InventoryCommand::CheckCapacityAvailable(command)
            }
            CheckFunctionable::TYPE => {
                let command: CheckFunctionable = serde_json::from_value(data.clone())
                    .map_err(|e| DomainError::malformed(command_type, e))?;
                InventoryCommand::CheckFunctionable(command)
            }
            _ => return Ok(None),
        };

        if command.entity_id().is_blank() {
            return Err(DomainError::InvalidCommand {
                command_type: command.command_type(),
                reason: "entityId must not be blank".to_string(),
            });
        }

        Ok(Some(command))
    }

    /// Returns the wire type discriminator.
    pub fn command_type(&self) -> &'static str {
        match self {
            InventoryCommand::CheckCapacityAvailable(_) => CheckCapacityAvailable::TYPE,
            InventoryCommand::CheckFunctionable(_) => CheckFunctionable::TYPE,
        }
    }

    /// Returns the inventory the command targets.
    pub fn entity_id(&self) -> &EntityId {
        match self {
            InventoryCommand::CheckCapacityAvailable(c) => &c.entity_id,
            InventoryCommand::CheckFunctionable(c) => &c.entity_id,
        }
    }

    /// Builds an appendable command record.
    pub fn to_event_data(&self, metadata: Metadata) -> Result<EventData, serde_json::Error> {
        Ok(EventData::json(self.command_type(), self)?.with_metadata(metadata))
    }
}

impl From<CheckCapacityAvailable> for InventoryCommand {
    fn from(command: CheckCapacityAvailable) -> Self {
        InventoryCommand::CheckCapacityAvailable(command)
    }
}

impl From<CheckFunctionable> for InventoryCommand {
    fn from(command: CheckFunctionable) -> Self {
        InventoryCommand::CheckFunctionable(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_capacity_check() {
        let data = json!({"entityId": "123", "newItemCount": 50});
        let command = InventoryCommand::parse(CheckCapacityAvailable::TYPE, &data)
            .unwrap()
            .unwrap();
        assert_eq!(
            command,
            InventoryCommand::CheckCapacityAvailable(CheckCapacityAvailable::new("123", 50))
        );
        assert_eq!(command.entity_id().as_str(), "123");
    }

    #[test]
    fn accepts_inventory_id_alias() {
        let data = json!({"inventoryId": "123"});
        let command = InventoryCommand::parse(CheckFunctionable::TYPE, &data)
            .unwrap()
            .unwrap();
        assert_eq!(command, CheckFunctionable::new("123").into());
    }

    #[test]
    fn unknown_type_is_not_an_error() {
        let result = InventoryCommand::parse("ic.somethingElse", &json!({"entityId": "1"}));
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn missing_field_is_malformed() {
        let result = InventoryCommand::parse(CheckCapacityAvailable::TYPE, &json!({"entityId": "1"}));
        assert!(matches!(result, Err(DomainError::MalformedPayload { .. })));

        let result = InventoryCommand::parse(CheckFunctionable::TYPE, &json!("not an object"));
        assert!(matches!(result, Err(DomainError::MalformedPayload { .. })));
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let data = json!({"entityId": "1", "newItemCount": "fifty"});
        let result = InventoryCommand::parse(CheckCapacityAvailable::TYPE, &data);
        assert!(matches!(result, Err(DomainError::MalformedPayload { .. })));
    }

    #[test]
    fn blank_entity_id_is_invalid() {
        let result = InventoryCommand::parse(CheckFunctionable::TYPE, &json!({"entityId": " "}));
        assert!(matches!(result, Err(DomainError::InvalidCommand { .. })));
    }

    #[test]
    fn negative_item_count_is_accepted() {
        let data = json!({"entityId": "1", "newItemCount": -3});
        let command = InventoryCommand::parse(CheckCapacityAvailable::TYPE, &data)
            .unwrap()
            .unwrap();
        assert_eq!(command, CheckCapacityAvailable::new("1", -3).into());
    }

    #[test]
    fn entity_id_and_alias_together_are_malformed() {
        let data = json!({"entityId": "1", "inventoryId": "1", "newItemCount": 5});
        let result = InventoryCommand::parse(CheckCapacityAvailable::TYPE, &data);
        assert!(matches!(
            result,
            Err(DomainError::MalformedPayload { ref source, .. })
                if source.to_string().contains("duplicate field")
        ));

        let data = json!({"entityId": "1", "inventoryId": "2"});
        let result = InventoryCommand::parse(CheckFunctionable::TYPE, &data);
        assert!(matches!(result, Err(DomainError::MalformedPayload { .. })));
    }

    #[test]
    fn event_data_carries_type_payload_and_metadata() {
        let command: InventoryCommand = CheckCapacityAvailable::new("7", 3).into();
        let event = command
            .to_event_data(Metadata::new().with_correlation_id("c-1"))
            .unwrap();
        assert_eq!(event.event_type, CheckCapacityAvailable::TYPE);
        assert_eq!(event.data, json!({"entityId": "7", "newItemCount": 3}));
        assert_eq!(event.metadata.correlation_id(), Some("c-1"));
    }
}
