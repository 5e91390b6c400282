//! Request-state tracking.
//!
//! Statuses live under a configurable root (default `requests.states`) at
//! the request's own path, so `["metadata", "tables", "fetch"]` is stored at
//! `requests.states.metadata.tables.fetch`. The map changes only through the
//! two actions built here.

use crate::tree::{get_in, remove_in, set_in};
use crate::{StoreError, StoreResult};
use reqflow_model::Reducer;
use reqflow_types::{Action, RequestPath, RequestStatus};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Kind of the action that records a status.
pub const SET_REQUEST_STATE: &str = "reqflow/requests/SET_REQUEST_STATE";

/// Kind of the action that removes a status.
pub const CLEAR_REQUEST_STATE: &str = "reqflow/requests/CLEAR_REQUEST_STATE";

/// Builds the action that records `status` at `path`, replacing any prior
/// status there.
pub fn set_request_state(path: &RequestPath, status: RequestStatus) -> Action {
    Action::new(
        SET_REQUEST_STATE,
        json!({ "statePath": path.to_value(), "status": status.to_value() }),
    )
}

/// Builds the action that resets `path` to absent.
pub fn clear_request_state(path: &RequestPath) -> Action {
    Action::new(CLEAR_REQUEST_STATE, json!({ "statePath": path.to_value() }))
}

#[derive(Deserialize)]
struct SetPayload {
    #[serde(rename = "statePath")]
    state_path: RequestPath,
    status: RequestStatus,
}

#[derive(Deserialize)]
struct ClearPayload {
    #[serde(rename = "statePath")]
    state_path: RequestPath,
}

/// A decoded request-state action.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestStateChange {
    Set {
        path: RequestPath,
        status: RequestStatus,
    },
    Clear {
        path: RequestPath,
    },
}

impl RequestStateChange {
    /// Decodes `action`.
    ///
    /// Returns `Ok(None)` for actions of other kinds and an error for a
    /// request-state action whose payload does not have the expected shape.
    pub fn from_action(action: &Action) -> StoreResult<Option<Self>> {
        let malformed = |e: serde_json::Error| StoreError::MalformedAction {
            kind: action.kind.clone(),
            reason: e.to_string(),
        };
        match action.kind.as_str() {
            SET_REQUEST_STATE => {
                let payload: SetPayload =
                    serde_json::from_value(action.payload.clone()).map_err(malformed)?;
                Ok(Some(Self::Set {
                    path: payload.state_path,
                    status: payload.status,
                }))
            }
            CLEAR_REQUEST_STATE => {
                let payload: ClearPayload =
                    serde_json::from_value(action.payload.clone()).map_err(malformed)?;
                Ok(Some(Self::Clear {
                    path: payload.state_path,
                }))
            }
            _ => Ok(None),
        }
    }

    /// The request path this change targets.
    pub fn path(&self) -> &RequestPath {
        match self {
            Self::Set { path, .. } | Self::Clear { path } => path,
        }
    }
}

/// Applies request-state actions to the whole state tree.
#[derive(Debug, Clone)]
pub struct RequestStateReducer {
    root: RequestPath,
}

impl RequestStateReducer {
    /// Creates a reducer storing statuses under `root`.
    pub fn new(root: RequestPath) -> Self {
        Self { root }
    }

    /// The root the statuses are stored under.
    pub fn root(&self) -> &RequestPath {
        &self.root
    }

    /// Reads the status recorded for `path` in `state`.
    pub fn status(&self, state: &Value, path: &RequestPath) -> Option<RequestStatus> {
        get_in(state, &self.root.join(path)).and_then(RequestStatus::from_value)
    }
}

impl Reducer<Value> for RequestStateReducer {
    fn reduce(&self, mut state: Value, action: &Action) -> Value {
        match RequestStateChange::from_action(action) {
            Ok(Some(RequestStateChange::Set { path, status })) => {
                debug!("Request {path} -> {status:?}");
                set_in(&mut state, &self.root.join(&path), status.to_value());
            }
            Ok(Some(RequestStateChange::Clear { path })) => {
                debug!("Request {path} cleared");
                remove_in(&mut state, &self.root.join(&path));
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring request-state action: {e}"),
        }
        state
    }
}
