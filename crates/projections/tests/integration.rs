//! Integration tests: lifecycle events in the store → engine → inventory state.

use std::sync::Arc;

use common::{EntityId, Metadata};
use domain::{DomainEvent, InventoryEvent, inventory_stream};
use event_store::{EventData, EventStoreExt, InMemoryEventStore};
use projections::{
    InventoryProjection, InventoryState, ProjectionEngine, ProjectionError, ProjectionQueries,
};

const NAME: &str = "inventory-ic-state";

async fn setup() -> (InMemoryEventStore, ProjectionEngine<InMemoryEventStore>) {
    let store = InMemoryEventStore::new();
    let engine = ProjectionEngine::new(store.clone());
    engine
        .create_continuous(NAME, Arc::new(InventoryProjection))
        .await
        .unwrap();
    (store, engine)
}

async fn record(store: &InMemoryEventStore, id: &str, event: InventoryEvent) {
    let stream = inventory_stream(&EntityId::new(id));
    let data = event.to_event_data(Metadata::new()).unwrap();
    store.append_event(&stream, data).await.unwrap();
}

async fn state_of(engine: &ProjectionEngine<InMemoryEventStore>, id: &str) -> InventoryState {
    let stream = inventory_stream(&EntityId::new(id));
    let value = engine.get_result(NAME, &stream).await.unwrap();
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn item_count_is_cumulative_across_events() {
    let (store, engine) = setup().await;
    record(&store, "123", InventoryEvent::created("123")).await;
    record(&store, "123", InventoryEvent::items_added(10)).await;
    record(&store, "123", InventoryEvent::items_added(5)).await;
    record(&store, "123", InventoryEvent::item_removed()).await;
    record(&store, "123", InventoryEvent::item_removed()).await;

    let state = state_of(&engine, "123").await;
    assert_eq!(state.item_count, 13);
    assert_eq!(state.id.as_deref(), Some("123"));
}

#[tokio::test]
async fn partitions_are_independent() {
    let (store, engine) = setup().await;
    record(&store, "a", InventoryEvent::created("a")).await;
    record(&store, "b", InventoryEvent::created("b")).await;
    record(&store, "a", InventoryEvent::items_added(4)).await;
    record(&store, "b", InventoryEvent::capacity_updated(50)).await;

    let a = state_of(&engine, "a").await;
    let b = state_of(&engine, "b").await;
    assert_eq!((a.item_count, a.capacity), (4, 0));
    assert_eq!((b.item_count, b.capacity), (0, 50));
}

#[tokio::test]
async fn never_created_inventory_is_a_sentinel() {
    let (store, engine) = setup().await;
    record(&store, "ghost", InventoryEvent::items_added(3)).await;

    let ghost = state_of(&engine, "ghost").await;
    assert!(!ghost.exists());
    assert_eq!(ghost.item_count, 3);

    let unseen = state_of(&engine, "nobody").await;
    assert_eq!(unseen, InventoryState::default());
}

#[tokio::test]
async fn legacy_and_unknown_types_in_category() {
    let (store, engine) = setup().await;
    record(&store, "1", InventoryEvent::created("1")).await;
    store
        .append_event(
            "inventory-1",
            EventData::raw("inventory.capicityUpdated", serde_json::json!({"capacity": 8})),
        )
        .await
        .unwrap();
    store
        .append_event(
            "inventory-1",
            EventData::raw("inventory.renamed", serde_json::json!({"name": "x"})),
        )
        .await
        .unwrap();

    let state = state_of(&engine, "1").await;
    assert_eq!(state.capacity, 8);
}

#[tokio::test]
async fn malformed_event_leaves_state_unchanged() {
    let (store, engine) = setup().await;
    record(&store, "1", InventoryEvent::items_added(2)).await;
    store
        .append_event(
            "inventory-1",
            EventData::raw("inventory.itemsAdded", serde_json::json!({"count": "lots"})),
        )
        .await
        .unwrap();
    record(&store, "1", InventoryEvent::items_added(1)).await;

    assert_eq!(state_of(&engine, "1").await.item_count, 3);
}

#[tokio::test]
async fn query_sees_events_committed_before_it() {
    let (store, engine) = setup().await;
    record(&store, "1", InventoryEvent::created("1")).await;
    assert!(state_of(&engine, "1").await.exists());

    record(&store, "1", InventoryEvent::functionability_updated(true)).await;
    assert!(state_of(&engine, "1").await.functionable);
}

#[tokio::test]
async fn unregistered_projection_is_code_two() {
    let engine = ProjectionEngine::new(InMemoryEventStore::new());
    let err = engine.get_result(NAME, "inventory-1").await.unwrap_err();
    assert_eq!(err.code(), ProjectionError::NOT_FOUND);
}
