use crate::RequestResult;
use serde::{Deserialize, Serialize};

/// Configuration for a [`RequestCoordinator`](crate::RequestCoordinator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Segment appended to a request path to track its fetch.
    pub fetch_segment: String,
    /// Segment appended to a request path to track its update.
    pub update_segment: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            fetch_segment: "fetch".to_string(),
            update_segment: "update".to_string(),
        }
    }
}

impl CoordinatorConfig {
    /// Reads a config from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> RequestResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
