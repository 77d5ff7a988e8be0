//! Command gateway for the strategy registry.
//!
//! This crate is the write path of the system: commands come in, get
//! validated structurally, checked against the uniqueness precondition on
//! the read-side projection, and — when they survive both — leave as
//! immutable domain events in the event log. Reads go straight to the
//! projection. The gateway never mutates strategy state itself.
//!
//! The uniqueness check and the event append are deliberately not atomic;
//! see [`StrategyService::create_strategy`] for the contract.

pub mod command;
pub mod error;
pub mod service;
pub mod validate;

pub use command::{Command, CommandOutcome};
pub use error::{FieldViolation, GatewayError};
pub use service::{SCHEMA_VERSION, StrategyCollection, StrategyService};
