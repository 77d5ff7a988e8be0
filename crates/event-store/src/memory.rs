use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{EventStore, EventStream};
use crate::{DomainEvent, EventType, Result};

/// In-memory event log.
///
/// Backs tests and the default server wiring. Events are held in insertion
/// order behind an `RwLock`; cloning shares the underlying log.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl InMemoryEventStore {
    /// Creates a new empty in-memory event log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of events stored.
    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns a copy of all events in insertion order.
    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.read().await.clone()
    }

    /// Clears all events.
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, event: DomainEvent) -> Result<()> {
        self.events.write().await.push(event);
        Ok(())
    }

    async fn events_by_type(&self, event_type: EventType) -> Result<Vec<DomainEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect())
    }

    async fn stream_all_events(&self) -> Result<EventStream> {
        use futures_util::stream;

        let events = self.events.read().await.clone();
        Ok(Box::pin(stream::iter(events.into_iter().map(Ok))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Strategy;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn append_stores_events_in_order() {
        let store = InMemoryEventStore::new();

        let created =
            DomainEvent::strategy_created(&Strategy::named("default"), "alice").unwrap();
        let deleted = DomainEvent::strategy_deleted("default", "alice");

        store.append(created).await.unwrap();
        store.append(deleted).await.unwrap();

        assert_eq!(store.event_count().await, 2);
        let events = store.events().await;
        assert_eq!(events[0].event_type, EventType::StrategyCreated);
        assert_eq!(events[1].event_type, EventType::StrategyDeleted);
    }

    #[tokio::test]
    async fn events_by_type_filters() {
        let store = InMemoryEventStore::new();
        store
            .append(DomainEvent::strategy_created(&Strategy::named("a"), "u").unwrap())
            .await
            .unwrap();
        store
            .append(DomainEvent::strategy_deleted("a", "u"))
            .await
            .unwrap();
        store
            .append(DomainEvent::strategy_created(&Strategy::named("b"), "u").unwrap())
            .await
            .unwrap();

        let created = store
            .events_by_type(EventType::StrategyCreated)
            .await
            .unwrap();
        assert_eq!(created.len(), 2);

        let deleted = store
            .events_by_type(EventType::StrategyDeleted)
            .await
            .unwrap();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].data["name"], "a");
    }

    #[tokio::test]
    async fn stream_yields_all_events_in_insertion_order() {
        let store = InMemoryEventStore::new();
        store
            .append(DomainEvent::strategy_created(&Strategy::named("first"), "u").unwrap())
            .await
            .unwrap();
        store
            .append(DomainEvent::strategy_created(&Strategy::named("second"), "u").unwrap())
            .await
            .unwrap();

        let stream = store.stream_all_events().await.unwrap();
        let events: Vec<_> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].data["name"], "first");
        assert_eq!(events[1].data["name"], "second");
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let store = InMemoryEventStore::new();
        store
            .append(DomainEvent::strategy_deleted("x", "u"))
            .await
            .unwrap();
        store.clear().await;
        assert_eq!(store.event_count().await, 0);
    }
}
