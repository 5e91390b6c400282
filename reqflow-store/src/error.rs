//! Error types for the store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid path or path segment.
    #[error("invalid path: {0}")]
    Path(#[from] reqflow_types::Error),

    /// An action of a known kind carried a payload of the wrong shape.
    #[error("malformed {kind} payload: {reason}")]
    MalformedAction { kind: String, reason: String },
}
