//! Transport-agnostic command surface.

use common::Strategy;

use crate::service::StrategyCollection;

/// A command submitted against the strategy registry.
///
/// Commands are transient: one exists per request, for the duration of
/// request processing only. Mutating variants carry the acting identity the
/// transport extracted; the gateway never reads identity from ambient state.
#[derive(Debug, Clone)]
pub enum Command {
    /// List all strategies in the current projection.
    List,

    /// Fetch a single strategy by name.
    Get { name: String },

    /// Create a new strategy.
    Create {
        strategy: Strategy,
        acting_identity: String,
    },

    /// Delete a strategy by name.
    Delete {
        name: String,
        acting_identity: String,
    },
}

impl Command {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::Get { .. } => "get",
            Command::Create { .. } => "create",
            Command::Delete { .. } => "delete",
        }
    }

    /// The strategy name this command targets, if any.
    pub fn target_name(&self) -> Option<&str> {
        match self {
            Command::List => None,
            Command::Get { name } | Command::Delete { name, .. } => Some(name),
            Command::Create { strategy, .. } => Some(&strategy.name),
        }
    }
}

/// Successful terminal state of a command.
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    /// `List` succeeded.
    Strategies(StrategyCollection),

    /// `Get` succeeded.
    Strategy(Strategy),

    /// `Create` succeeded; the event was appended.
    Created,

    /// `Delete` succeeded; the event was appended.
    Deleted,
}
