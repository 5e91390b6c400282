//! Tagged action records.
//!
//! Every state change goes through a single reducer as an [`Action`]: a
//! named kind plus a JSON payload. Failed outcomes carry the error as their
//! payload and set `failed`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, payload-carrying unit describing one state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// The action kind (e.g. `"metadata/FETCH_TABLE"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Arbitrary payload; the error value when `failed` is set.
    #[serde(default)]
    pub payload: Value,
    /// True when this action records a failed outcome.
    #[serde(rename = "error", default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
}

impl Action {
    /// Creates a successful action.
    pub fn new(kind: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            payload: payload.into(),
            failed: false,
        }
    }

    /// Creates an action with a null payload.
    pub fn bare(kind: impl Into<String>) -> Self {
        Self::new(kind, Value::Null)
    }

    /// Creates a failed action carrying `error` as its payload.
    pub fn failure(kind: impl Into<String>, error: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            payload: error.into(),
            failed: true,
        }
    }

    /// Looks up a nested payload value by object keys.
    #[must_use]
    pub fn payload_at(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().try_fold(&self.payload, |v, k| v.get(*k))
    }

    /// Serializes the action to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes an action from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
