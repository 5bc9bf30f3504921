use criterion::{Criterion, criterion_group, criterion_main};
use event_store::{
    EventData, EventStore, EventStoreExt, InMemoryEventStore, Position, SubscribeOptions,
};

fn make_event(n: u64) -> EventData {
    EventData::raw(
        "inventory.itemsAdded",
        serde_json::json!({ "count": n % 7 + 1 }),
    )
}

fn bench_append_single_event(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("event_store/append_single_event", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryEventStore::new();
                store
                    .append("inventory-1", vec![make_event(1)])
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_append_batch_10(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("event_store/append_batch_10", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryEventStore::new();
                let events: Vec<EventData> = (0..10).map(make_event).collect();
                store
                    .append("inventory-1", events)
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_read_all_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryEventStore::new();

    // 1000 events across 10 streams
    rt.block_on(async {
        for stream in 0..10 {
            let events: Vec<EventData> = (0..100).map(make_event).collect();
            store
                .append(&format!("inventory-{stream}"), events)
                .await
                .unwrap();
        }
    });

    c.bench_function("event_store/read_all_1000_events", |b| {
        b.iter(|| {
            rt.block_on(async {
                let events = store.read_all_from(Position::start()).await.unwrap();
                assert_eq!(events.len(), 1000);
            });
        });
    });
}

fn bench_append_with_subscriber(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("event_store/append_with_live_subscriber", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryEventStore::new();
                let mut subscription = store
                    .subscribe_to_stream("command-ic", SubscribeOptions::from_end())
                    .await
                    .unwrap();
                store
                    .append_event("command-ic", make_event(1))
                    .await
                    .unwrap();
                subscription.next_event().await.unwrap().unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_append_single_event,
    bench_append_batch_10,
    bench_read_all_1000,
    bench_append_with_subscriber,
);
criterion_main!(benches);
