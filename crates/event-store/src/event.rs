use chrono::{DateTime, Utc};
use common::Strategy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an event ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kinds of domain events the gateway emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A strategy definition was created.
    #[serde(rename = "strategy-created")]
    StrategyCreated,

    /// A strategy definition was deleted.
    #[serde(rename = "strategy-deleted")]
    StrategyDeleted,
}

impl EventType {
    /// Returns the wire name of this event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::StrategyCreated => "strategy-created",
            EventType::StrategyDeleted => "strategy-deleted",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable record of a mutation the gateway accepted.
///
/// Events are the only write the gateway performs. Once constructed and
/// appended they are never updated or deleted; the read-side projection is
/// rebuilt from them by replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// What happened.
    #[serde(rename = "type")]
    pub event_type: EventType,

    /// Who issued the command. Always present; the transport substitutes a
    /// sentinel such as `"unknown"` when no identity could be extracted.
    pub created_by: String,

    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,

    /// Event payload: the full strategy for `StrategyCreated`, `{"name"}`
    /// for `StrategyDeleted`.
    pub data: serde_json::Value,
}

impl DomainEvent {
    /// Creates an event with a fresh ID and the current timestamp.
    pub fn new(
        event_type: EventType,
        created_by: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            event_type,
            created_by: created_by.into(),
            timestamp: Utc::now(),
            data,
        }
    }

    /// Builds a `StrategyCreated` event carrying the full strategy payload.
    pub fn strategy_created(
        strategy: &Strategy,
        created_by: impl Into<String>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            EventType::StrategyCreated,
            created_by,
            serde_json::to_value(strategy)?,
        ))
    }

    /// Builds a `StrategyDeleted` event carrying only the strategy name.
    pub fn strategy_deleted(name: &str, created_by: impl Into<String>) -> Self {
        Self::new(
            EventType::StrategyDeleted,
            created_by,
            serde_json::json!({ "name": name }),
        )
    }
}
