//! Projection processor for feeding events to projections.

use event_store::{DomainEvent, EventStore};
use futures_util::StreamExt;
use tokio::sync::Mutex;

use crate::Result;
use crate::projection::Projection;

/// Processes events from the event log and delivers them to projections.
///
/// The processor supports:
/// - Catch-up: replays all events from the log to bring projections up to date
/// - Single event delivery: delivers a new event to all projections
/// - Rebuild: resets all projections and replays from scratch
///
/// Catch-up and rebuild runs are serialized through an internal lock: a
/// projection's position read and its event delivery are not one atomic
/// step, so overlapping runs could double-deliver an event and advance the
/// position past the log length, after which later events would never be
/// delivered.
pub struct ProjectionProcessor<S: EventStore> {
    store: S,
    projections: Vec<Box<dyn Projection>>,
    catch_up: Mutex<()>,
}

impl<S: EventStore> ProjectionProcessor<S> {
    /// Creates a new processor with the given event log.
    pub fn new(store: S) -> Self {
        Self {
            store,
            projections: Vec::new(),
            catch_up: Mutex::new(()),
        }
    }

    /// Registers a projection with this processor.
    pub fn register(&mut self, projection: Box<dyn Projection>) {
        self.projections.push(projection);
    }

    /// Returns the number of registered projections.
    pub fn projection_count(&self) -> usize {
        self.projections.len()
    }

    /// Runs catch-up processing: streams all events from the log and delivers
    /// them to each projection that hasn't already seen them.
    ///
    /// Concurrent calls queue behind one another rather than interleave.
    #[tracing::instrument(skip(self))]
    pub async fn run_catch_up(&self) -> Result<()> {
        let _guard = self.catch_up.lock().await;
        self.deliver_pending().await
    }

    async fn deliver_pending(&self) -> Result<()> {
        let mut stream = self.store.stream_all_events().await?;
        let mut event_index: u64 = 0;

        while let Some(result) = stream.next().await {
            let event = result?;
            event_index += 1;

            for projection in &self.projections {
                let pos = projection.position().await;
                if pos.events_processed < event_index {
                    projection.handle(&event).await?;
                    metrics::counter!("projections_events_processed").increment(1);
                }
            }
        }

        tracing::info!(events_processed = event_index, "catch-up complete");

        Ok(())
    }

    /// Delivers a single event to all registered projections.
    #[tracing::instrument(skip(self, event), fields(event_type = %event.event_type))]
    pub async fn process_event(&self, event: &DomainEvent) -> Result<()> {
        for projection in &self.projections {
            projection.handle(event).await?;
        }
        Ok(())
    }

    /// Resets all projections and replays all events from the log.
    #[tracing::instrument(skip(self))]
    pub async fn rebuild_all(&self) -> Result<()> {
        let _guard = self.catch_up.lock().await;
        for projection in &self.projections {
            projection.reset().await?;
        }
        self.deliver_pending().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionPosition;
    use async_trait::async_trait;
    use common::Strategy;
    use event_store::InMemoryEventStore;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// A simple counting projection for testing.
    struct CountingProjection {
        count: Arc<RwLock<u64>>,
        position: Arc<RwLock<ProjectionPosition>>,
    }

    impl CountingProjection {
        fn new() -> Self {
            Self {
                count: Arc::new(RwLock::new(0)),
                position: Arc::new(RwLock::new(ProjectionPosition::zero())),
            }
        }
    }

    #[async_trait]
    impl Projection for CountingProjection {
        fn name(&self) -> &'static str {
            "CountingProjection"
        }

        async fn handle(&self, _event: &DomainEvent) -> Result<()> {
            *self.count.write().await += 1;
            let mut pos = self.position.write().await;
            *pos = pos.advance();
            Ok(())
        }

        async fn position(&self) -> ProjectionPosition {
            *self.position.read().await
        }

        async fn reset(&self) -> Result<()> {
            *self.count.write().await = 0;
            *self.position.write().await = ProjectionPosition::zero();
            Ok(())
        }
    }

    async fn store_with_events(n: usize) -> InMemoryEventStore {
        let store = InMemoryEventStore::new();
        for i in 0..n {
            store
                .append(
                    DomainEvent::strategy_created(&Strategy::named(format!("s{i}")), "tester")
                        .unwrap(),
                )
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn catch_up_delivers_all_events() {
        let store = store_with_events(3).await;
        let counting = CountingProjection::new();
        let count = counting.count.clone();

        let mut processor = ProjectionProcessor::new(store);
        processor.register(Box::new(counting));
        processor.run_catch_up().await.unwrap();

        assert_eq!(*count.read().await, 3);
    }

    #[tokio::test]
    async fn catch_up_is_idempotent() {
        let store = store_with_events(2).await;
        let counting = CountingProjection::new();
        let count = counting.count.clone();

        let mut processor = ProjectionProcessor::new(store);
        processor.register(Box::new(counting));
        processor.run_catch_up().await.unwrap();
        processor.run_catch_up().await.unwrap();

        assert_eq!(*count.read().await, 2);
    }

    /// Projection that records delivered strategy names, holding each
    /// delivery open long enough for another catch-up to overlap.
    struct SlowRecordingProjection {
        delivered: Arc<RwLock<Vec<String>>>,
        position: Arc<RwLock<ProjectionPosition>>,
    }

    impl SlowRecordingProjection {
        fn new() -> Self {
            Self {
                delivered: Arc::new(RwLock::new(Vec::new())),
                position: Arc::new(RwLock::new(ProjectionPosition::zero())),
            }
        }
    }

    #[async_trait]
    impl Projection for SlowRecordingProjection {
        fn name(&self) -> &'static str {
            "SlowRecordingProjection"
        }

        async fn handle(&self, event: &DomainEvent) -> Result<()> {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            if let Some(name) = event.data.get("name").and_then(|n| n.as_str()) {
                self.delivered.write().await.push(name.to_string());
            }
            let mut pos = self.position.write().await;
            *pos = pos.advance();
            Ok(())
        }

        async fn position(&self) -> ProjectionPosition {
            *self.position.read().await
        }

        async fn reset(&self) -> Result<()> {
            self.delivered.write().await.clear();
            *self.position.write().await = ProjectionPosition::zero();
            Ok(())
        }
    }

    #[tokio::test]
    async fn concurrent_catch_up_delivers_each_event_exactly_once() {
        let store = store_with_events(2).await;
        let slow = SlowRecordingProjection::new();
        let delivered = slow.delivered.clone();

        let mut processor = ProjectionProcessor::new(store.clone());
        processor.register(Box::new(slow));

        // Overlapping catch-ups must not double-deliver or overrun the
        // projection's position.
        let (first, second) = tokio::join!(processor.run_catch_up(), processor.run_catch_up());
        first.unwrap();
        second.unwrap();

        // An event appended afterwards must still be delivered.
        store
            .append(DomainEvent::strategy_created(&Strategy::named("s2"), "tester").unwrap())
            .await
            .unwrap();
        processor.run_catch_up().await.unwrap();

        assert_eq!(*delivered.read().await, vec!["s0", "s1", "s2"]);
    }

    #[tokio::test]
    async fn rebuild_resets_then_replays() {
        let store = store_with_events(2).await;
        let counting = CountingProjection::new();
        let count = counting.count.clone();

        let mut processor = ProjectionProcessor::new(store);
        processor.register(Box::new(counting));
        processor.run_catch_up().await.unwrap();
        processor.rebuild_all().await.unwrap();

        assert_eq!(*count.read().await, 2);
        assert_eq!(processor.projection_count(), 1);
    }
}
