//! Error types for the async layer.

use serde_json::{json, Value};
use thiserror::Error;

/// Result type for async-layer operations.
pub type RequestResult<T> = Result<T, RequestError>;

/// Failures raised by caller-supplied operations.
///
/// The coordinators catch these, so callers only meet them through the
/// `Error` status value or the log.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The data-fetching operation failed.
    #[error("fetch failed: {0:#}")]
    Fetch(anyhow::Error),

    /// The write operation failed.
    #[error("update failed: {0:#}")]
    Update(anyhow::Error),

    /// Computing or sending analytics failed.
    #[error("analytics failed: {0:#}")]
    Analytics(anyhow::Error),

    /// Configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl RequestError {
    /// Short name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::Update(_) => "update",
            Self::Analytics(_) => "analytics",
            Self::Config(_) => "config",
        }
    }

    /// JSON value stored in the `Error` status of the failed slot.
    pub fn to_status_value(&self) -> Value {
        let message = match self {
            Self::Fetch(e) | Self::Update(e) | Self::Analytics(e) => format!("{e:#}"),
            Self::Config(e) => e.to_string(),
        };
        json!({ "kind": self.kind(), "message": message })
    }
}

/// JSON payload of a failed action.
pub fn error_payload(error: &anyhow::Error) -> Value {
    json!({ "message": format!("{error:#}") })
}
