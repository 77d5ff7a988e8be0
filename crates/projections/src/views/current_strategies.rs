//! Current strategies read model — live (not-deleted) strategy definitions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::Strategy;
use event_store::{DomainEvent, EventType};
use tokio::sync::RwLock;

use crate::Result;
use crate::projection::{Projection, ProjectionPosition};
use crate::read_model::{ReadModel, StrategyStore};

/// Read model view of the strategies currently live, keyed by name.
///
/// `strategy-created` inserts, `strategy-deleted` removes. A delete for an
/// unknown name is a no-op rather than an error: the log may contain
/// duplicate creations for one name (the gateway's uniqueness check is not
/// atomic with the append), and replay must stay total regardless.
#[derive(Clone)]
pub struct CurrentStrategiesView {
    strategies: Arc<RwLock<HashMap<String, Strategy>>>,
    position: Arc<RwLock<ProjectionPosition>>,
}

impl CurrentStrategiesView {
    /// Creates a new empty view.
    pub fn new() -> Self {
        Self {
            strategies: Arc::new(RwLock::new(HashMap::new())),
            position: Arc::new(RwLock::new(ProjectionPosition::zero())),
        }
    }

    /// Seeds the view with a strategy, bypassing event replay. Test helper.
    pub async fn insert(&self, strategy: Strategy) {
        self.strategies
            .write()
            .await
            .insert(strategy.name.clone(), strategy);
    }
}

impl Default for CurrentStrategiesView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StrategyStore for CurrentStrategiesView {
    async fn get_strategies(&self) -> Vec<Strategy> {
        let mut strategies: Vec<_> = self.strategies.read().await.values().cloned().collect();
        strategies.sort_by(|a, b| a.name.cmp(&b.name));
        strategies
    }

    async fn get_strategy(&self, name: &str) -> Option<Strategy> {
        self.strategies.read().await.get(name).cloned()
    }
}

#[async_trait]
impl Projection for CurrentStrategiesView {
    fn name(&self) -> &'static str {
        "CurrentStrategiesView"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<()> {
        let mut strategies = self.strategies.write().await;

        match event.event_type {
            EventType::StrategyCreated => {
                let strategy: Strategy = serde_json::from_value(event.data.clone())?;
                strategies.insert(strategy.name.clone(), strategy);
            }
            EventType::StrategyDeleted => {
                if let Some(name) = event.data.get("name").and_then(|n| n.as_str()) {
                    strategies.remove(name);
                }
            }
        }

        let mut pos = self.position.write().await;
        *pos = pos.advance();

        Ok(())
    }

    async fn position(&self) -> ProjectionPosition {
        *self.position.read().await
    }

    async fn reset(&self) -> Result<()> {
        self.strategies.write().await.clear();
        *self.position.write().await = ProjectionPosition::zero();
        Ok(())
    }
}

impl ReadModel for CurrentStrategiesView {
    fn name(&self) -> &'static str {
        "CurrentStrategiesView"
    }

    fn count(&self) -> usize {
        // Use try_read to avoid blocking; returns 0 if lock is held
        self.strategies.try_read().map(|s| s.len()).unwrap_or(0)
    }
}
