use crate::StoreResult;
use reqflow_types::RequestPath;
use serde::{Deserialize, Serialize};

/// Configuration for a [`Store`](crate::Store).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Where the request-state map lives in the state tree.
    pub request_states_root: RequestPath,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            request_states_root: RequestPath::from(["requests", "states"]),
        }
    }
}

impl StoreConfig {
    /// Reads a config from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
