//! Command handlers for the strategy registry.

use common::Strategy;
use event_store::{DomainEvent, EventStore, EventStoreError};
use projections::StrategyStore;
use serde::Serialize;

use crate::command::{Command, CommandOutcome};
use crate::error::GatewayError;
use crate::validate;

/// Schema version stamped on list responses.
pub const SCHEMA_VERSION: u32 = 1;

/// The list-response body: a fixed schema-version marker plus the
/// strategies currently live in the projection.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyCollection {
    pub version: u32,
    pub strategies: Vec<Strategy>,
}

/// Command gateway over the strategy registry.
///
/// Reads go to the query port `Q`; mutations are recorded as events on the
/// emission port `S` and never touch strategy state directly. Each handler
/// runs its stages sequentially with no internal retry: validation, then
/// the projection query, then the append, any of which may terminate the
/// command with a typed error.
pub struct StrategyService<S, Q> {
    events: S,
    strategies: Q,
}

impl<S, Q> StrategyService<S, Q>
where
    S: EventStore,
    Q: StrategyStore,
{
    /// Creates a gateway over the given event log and projection.
    pub fn new(events: S, strategies: Q) -> Self {
        Self { events, strategies }
    }

    /// Executes a command, dispatching to the matching handler.
    pub async fn execute(&self, command: Command) -> Result<CommandOutcome, GatewayError> {
        match command {
            Command::List => Ok(CommandOutcome::Strategies(self.list_strategies().await)),
            Command::Get { name } => Ok(CommandOutcome::Strategy(self.get_strategy(&name).await?)),
            Command::Create {
                strategy,
                acting_identity,
            } => {
                self.create_strategy(strategy, &acting_identity).await?;
                Ok(CommandOutcome::Created)
            }
            Command::Delete {
                name,
                acting_identity,
            } => {
                self.delete_strategy(&name, &acting_identity).await?;
                Ok(CommandOutcome::Deleted)
            }
        }
    }

    /// Lists all strategies with the schema-version marker.
    ///
    /// An empty projection is a valid, non-error response.
    #[tracing::instrument(skip(self))]
    pub async fn list_strategies(&self) -> StrategyCollection {
        StrategyCollection {
            version: SCHEMA_VERSION,
            strategies: self.strategies.get_strategies().await,
        }
    }

    /// Fetches a single strategy by name.
    #[tracing::instrument(skip(self))]
    pub async fn get_strategy(&self, name: &str) -> Result<Strategy, GatewayError> {
        self.strategies
            .get_strategy(name)
            .await
            .ok_or_else(|| GatewayError::NotFound {
                name: name.to_string(),
            })
    }

    /// Creates a strategy: structural validation, uniqueness precondition,
    /// then a `strategy-created` event attributed to `created_by`.
    ///
    /// The uniqueness check and the append are NOT atomic. Two concurrent
    /// creates for the same new name can both observe "not found" here and
    /// both append, leaving two `strategy-created` events for one name; the
    /// projection resolves that as last-writer-wins on replay. Preventing
    /// the duplicate would require a conditional append at the event log,
    /// which this gateway does not assume.
    #[tracing::instrument(skip(self, strategy), fields(strategy = %strategy.name))]
    pub async fn create_strategy(
        &self,
        strategy: Strategy,
        created_by: &str,
    ) -> Result<(), GatewayError> {
        validate::validate_new_strategy(&strategy).map_err(GatewayError::Validation)?;

        if self.strategies.get_strategy(&strategy.name).await.is_some() {
            return Err(GatewayError::NameExists {
                name: strategy.name,
            });
        }

        let event = DomainEvent::strategy_created(&strategy, created_by)
            .map_err(EventStoreError::Serialization)?;

        if let Err(err) = self.events.append(event).await {
            tracing::error!(strategy = %strategy.name, error = %err, "could not create strategy");
            return Err(err.into());
        }

        metrics::counter!("strategies_created_total").increment(1);
        Ok(())
    }

    /// Deletes a strategy: existence check, then a `strategy-deleted` event
    /// carrying the name, attributed to `created_by`.
    ///
    /// A missing strategy is a benign outcome and is not logged.
    #[tracing::instrument(skip(self))]
    pub async fn delete_strategy(&self, name: &str, created_by: &str) -> Result<(), GatewayError> {
        if self.strategies.get_strategy(name).await.is_none() {
            return Err(GatewayError::NotFound {
                name: name.to_string(),
            });
        }

        let event = DomainEvent::strategy_deleted(name, created_by);

        if let Err(err) = self.events.append(event).await {
            tracing::error!(strategy = %name, error = %err, "could not delete strategy");
            return Err(err.into());
        }

        metrics::counter!("strategies_deleted_total").increment(1);
        Ok(())
    }
}
