//! Gateway error taxonomy.

use event_store::EventStoreError;
use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// The offending field, e.g. `"name"`.
    pub field: String,
    /// What the field failed to satisfy.
    pub message: String,
}

impl FieldViolation {
    /// Creates a violation for the given field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors a command handler can surface.
///
/// The first three variants are client-caused and map to client-facing
/// outcomes; `EventStore` is an infrastructure fault and always maps to a
/// generic server-fault outcome with the detail kept internal.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// One or more structural validation failures on the command payload.
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// The uniqueness precondition failed: a live strategy already owns
    /// this name.
    #[error("A strategy named '{name}' already exists.")]
    NameExists { name: String },

    /// The referenced strategy is absent from the current projection.
    #[error("Could not find strategy")]
    NotFound { name: String },

    /// The event log failed to record the mutation.
    #[error(transparent)]
    EventStore(#[from] EventStoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_exists_message_names_the_conflict() {
        let err = GatewayError::NameExists {
            name: "gradualRollout".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "A strategy named 'gradualRollout' already exists."
        );
    }

    #[test]
    fn field_violation_serializes_field_and_message() {
        let violation = FieldViolation::new("name", "Name is required");
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["field"], "name");
        assert_eq!(json["message"], "Name is required");
    }
}
