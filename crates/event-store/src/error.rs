use thiserror::Error;

/// Errors that can occur when interacting with the event log.
///
/// Every variant is an infrastructure-level fault. Callers must never map
/// these to client errors; the outcome mapper treats them as server faults.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// The storage backend rejected or failed the operation.
    #[error("Storage backend error: {0}")]
    Storage(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for event log operations.
pub type Result<T> = std::result::Result<T, EventStoreError>;
