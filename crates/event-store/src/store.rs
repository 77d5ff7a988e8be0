use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::{DomainEvent, EventType, Result};

/// A stream of events in insertion order.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<DomainEvent>> + Send>>;

/// Append port for the domain event log.
///
/// The gateway appends to the log and never reads it on the write path;
/// projections replay it to maintain current-state views. Implementations
/// must be thread-safe (Send + Sync).
///
/// Appends are single-shot with no internal retry, and carry no uniqueness
/// condition over event payloads: two concurrent commands that both pass
/// their preconditions will both land in the log. Any stronger guarantee
/// (e.g. a conditional append keyed on strategy name) belongs to the
/// implementation, not this contract.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Durably records an event. Errors are infrastructure faults.
    async fn append(&self, event: DomainEvent) -> Result<()>;

    /// Retrieves all events of a given type, in insertion order.
    async fn events_by_type(&self, event_type: EventType) -> Result<Vec<DomainEvent>>;

    /// Streams all events in insertion order, for projection replay.
    async fn stream_all_events(&self) -> Result<EventStream>;
}
