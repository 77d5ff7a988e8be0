//! Read-side strategy views maintained by event replay.
//!
//! The gateway's write path never touches these views directly: it appends
//! events and moves on. The views catch up by replaying the event log:
//! - [`StrategyStore`] — the query port the gateway reads through
//! - [`Projection`] — trait for processing events into read models
//! - [`ProjectionProcessor`] — feeds events from the log to projections
//! - [`CurrentStrategiesView`] — current live strategies, keyed by name

pub mod error;
pub mod processor;
pub mod projection;
pub mod read_model;
pub mod views;

pub use error::{ProjectionError, Result};
pub use processor::ProjectionProcessor;
pub use projection::{Projection, ProjectionPosition};
pub use read_model::{ReadModel, StrategyStore};
pub use views::CurrentStrategiesView;
