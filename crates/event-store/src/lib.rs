//! Append-only domain event log for the strategy gateway.
//!
//! The gateway records every mutation as an immutable [`DomainEvent`] rather
//! than writing entity state directly. This crate defines the event shape,
//! the [`EventStore`] append port, and an in-memory implementation used by
//! tests and the default server wiring.

pub mod error;
pub mod event;
pub mod memory;
pub mod store;

pub use error::{EventStoreError, Result};
pub use event::{DomainEvent, EventId, EventType};
pub use memory::InMemoryEventStore;
pub use store::{EventStore, EventStream};
