//! Read model views over the strategy event log.

pub mod current_strategies;

pub use current_strategies::CurrentStrategiesView;
