//! Shared types for the strategy gateway.

pub mod types;

pub use types::Strategy;
