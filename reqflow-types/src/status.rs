//! Request lifecycle status.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status of one tracked request slot.
///
/// Lifecycle: absent -> `Loading` -> `Loaded` | `Error`. An `Error` keeps its
/// value until the slot is cleared or re-attempted.
///
/// Serialized as `{"state":"LOADING"}`, `{"state":"LOADED"}` or
/// `{"state":"ERROR","error":...}` so the status can live inside the JSON
/// state tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Loading,
    Loaded,
    Error {
        #[serde(default)]
        error: Value,
    },
}

impl RequestStatus {
    /// Creates an error status carrying `error`.
    pub fn error(error: impl Into<Value>) -> Self {
        Self::Error { error: error.into() }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// The error value, for `Error` statuses.
    #[must_use]
    pub fn error_value(&self) -> Option<&Value> {
        match self {
            Self::Error { error } => Some(error),
            _ => None,
        }
    }

    /// Renders the status as it is stored in the state tree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        // A tagged enum of plain variants always serializes.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Reads a status back from the state tree.
    ///
    /// Returns `None` for null or for values that are not a recognized status.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}
