//! Query-side traits: the strategy query port and the read model marker.

use async_trait::async_trait;
use common::Strategy;

/// Query port over the current strategy projection.
///
/// Pure reads, idempotent, safe to call repeatedly. The snapshot a caller
/// observes may be stale relative to in-flight events; the gateway's
/// uniqueness precondition is checked against whatever this port returns
/// at that moment.
#[async_trait]
pub trait StrategyStore: Send + Sync {
    /// Returns all strategies currently live in the projection.
    async fn get_strategies(&self) -> Vec<Strategy>;

    /// Returns the strategy with the given name, if the projection has one.
    async fn get_strategy(&self, name: &str) -> Option<Strategy>;
}

/// A read model providing query access to denormalized data.
pub trait ReadModel: Send + Sync {
    /// Returns the name of this read model.
    fn name(&self) -> &'static str;

    /// Returns the number of entries in this read model.
    fn count(&self) -> usize;
}
