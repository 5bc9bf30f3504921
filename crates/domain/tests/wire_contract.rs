//! Wire-format tests for the messages exchanged over the ic streams.

use common::{EntityId, Metadata};
use domain::{
    CheckCapacityAvailable, CheckFunctionable, DomainEvent, InventoryCheckEvent,
    InventoryCommand, InventoryEvent,
};
use serde_json::json;

#[test]
fn command_discriminators_match_published_names() {
    assert_eq!(
        CheckCapacityAvailable::TYPE,
        "ic.checkIsInventoryCapacityAvailable"
    );
    assert_eq!(CheckFunctionable::TYPE, "ic.checkIsInventoryFuncationable");
}

#[test]
fn producer_payloads_parse_into_commands() {
    let capacity = InventoryCommand::parse(
        "ic.checkIsInventoryCapacityAvailable",
        &json!({"inventoryId": "123", "newItemCount": 50}),
    )
    .unwrap()
    .unwrap();
    assert_eq!(capacity.entity_id(), &EntityId::new("123"));

    let functionable = InventoryCommand::parse(
        "ic.checkIsInventoryFuncationable",
        &json!({"entityId": "123"}),
    )
    .unwrap()
    .unwrap();
    assert_eq!(functionable.command_type(), CheckFunctionable::TYPE);
}

#[test]
fn extra_payload_fields_are_tolerated() {
    let command = InventoryCommand::parse(
        CheckFunctionable::TYPE,
        &json!({"entityId": "9", "requestedBy": "ops"}),
    )
    .unwrap();
    assert!(command.is_some());
}

#[test]
fn result_events_carry_metadata_verbatim() {
    let metadata = Metadata::new()
        .with_correlation_id("corr-1")
        .with("causationId", json!("cmd-1"));
    let event = InventoryCheckEvent::capacity_available_checked(60)
        .to_event_data(metadata.clone())
        .unwrap();

    assert_eq!(event.event_type, "ic.inventoryCapacityAvailableChecked");
    assert_eq!(event.data, json!({"available": 60}));
    assert_eq!(event.metadata, metadata);
}

#[test]
fn lifecycle_events_use_dotted_names() {
    let types: Vec<_> = [
        InventoryEvent::created("1"),
        InventoryEvent::items_added(3),
        InventoryEvent::item_removed(),
        InventoryEvent::capacity_updated(100),
        InventoryEvent::functionability_updated(true),
    ]
    .iter()
    .map(|e| e.event_type())
    .collect();

    assert!(types.iter().all(|t| t.starts_with("inventory.")));
}
