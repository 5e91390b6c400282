//! Fetch and update coordination against tracked request slots.

use crate::{CoordinatorConfig, RequestError};
use futures::future::{BoxFuture, FutureExt};
use reqflow_store::{clear_request_state, set_request_state, StateAccess};
use reqflow_types::{Action, RequestPath, RequestStatus};
use serde_json::Value;
use std::future::Future;
use tracing::{debug, error};

type DataOp<'a> = Box<dyn FnOnce() -> BoxFuture<'a, anyhow::Result<Value>> + Send + 'a>;

type DataAction<'a> = Box<dyn FnOnce(&Value) -> Action + Send + 'a>;

fn boxed_op<'a, F, Fut>(op: F) -> DataOp<'a>
where
    F: FnOnce() -> Fut + Send + 'a,
    Fut: Future<Output = anyhow::Result<Value>> + Send + 'a,
{
    Box::new(move || op().boxed())
}

/// Parameters of one [`RequestCoordinator::fetch_data`] call.
pub struct FetchRequest<'a> {
    request_state_path: RequestPath,
    existing_state_path: RequestPath,
    get_data: DataOp<'a>,
    reload: bool,
    properties: Option<Vec<String>>,
    on_data: Option<DataAction<'a>>,
}

impl<'a> FetchRequest<'a> {
    /// Creates a fetch of `get_data`, tracked under `request_state_path`,
    /// whose previous result lives at `existing_state_path`.
    pub fn new<F, Fut>(
        request_state_path: RequestPath,
        existing_state_path: RequestPath,
        get_data: F,
    ) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'a,
    {
        Self {
            request_state_path,
            existing_state_path,
            get_data: boxed_op(get_data),
            reload: false,
            properties: None,
            on_data: None,
        }
    }

    /// Forces the fetch even when the slot is loading or loaded.
    #[must_use]
    pub fn reload(mut self, reload: bool) -> Self {
        self.reload = reload;
        self
    }

    /// Fields whose presence on the existing data makes a fetch unnecessary.
    #[must_use]
    pub fn properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = Some(properties.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the action that stores fetched data.
    ///
    /// It is dispatched in one batch with the `Loaded` status, data first, so
    /// no snapshot shows the slot loaded without its data.
    #[must_use]
    pub fn on_data(mut self, to_action: impl FnOnce(&Value) -> Action + Send + 'a) -> Self {
        self.on_data = Some(Box::new(to_action));
        self
    }
}

/// Parameters of one [`RequestCoordinator::update_data`] call.
pub struct UpdateRequest<'a> {
    request_state_path: RequestPath,
    existing_state_path: Option<RequestPath>,
    dependent_request_state_paths: Vec<RequestPath>,
    put_data: DataOp<'a>,
}

impl<'a> UpdateRequest<'a> {
    /// Creates an update running `put_data`, tracked under
    /// `request_state_path`.
    pub fn new<F, Fut>(request_state_path: RequestPath, put_data: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'a,
    {
        Self {
            request_state_path,
            existing_state_path: None,
            dependent_request_state_paths: Vec::new(),
            put_data: boxed_op(put_data),
        }
    }

    /// Where the data being updated lives; returned if the update fails.
    #[must_use]
    pub fn existing_state_path(mut self, path: RequestPath) -> Self {
        self.existing_state_path = Some(path);
        self
    }

    /// Request paths whose statuses are cleared after a successful update.
    #[must_use]
    pub fn dependent_request_state_paths(
        mut self,
        paths: impl IntoIterator<Item = RequestPath>,
    ) -> Self {
        self.dependent_request_state_paths = paths.into_iter().collect();
        self
    }
}

/// Runs fetches and updates with request-state bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct RequestCoordinator {
    config: CoordinatorConfig,
}

impl RequestCoordinator {
    pub fn new(config: CoordinatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Path that tracks fetches of `request_state_path`.
    pub fn fetch_path(&self, request_state_path: &RequestPath) -> RequestPath {
        request_state_path.child(self.config.fetch_segment.as_str())
    }

    /// Path that tracks updates of `request_state_path`.
    pub fn update_path(&self, request_state_path: &RequestPath) -> RequestPath {
        request_state_path.child(self.config.update_segment.as_str())
    }

    /// Fetches data unless the cached copy is adequate or a fetch is
    /// already loading or loaded.
    ///
    /// Returns the fresh data on a fetch, otherwise the existing data
    /// (`None` when nothing is cached). Existing data counts as absent only
    /// when it is missing or JSON null; `false`, `0` and `""` are cached
    /// values. A failed fetch records an `Error` status and returns the
    /// existing data.
    ///
    /// The slot is `Loaded` by the time this returns. With
    /// [`FetchRequest::on_data`] the data action and the status flip land
    /// together; otherwise the caller stores the data afterwards.
    pub async fn fetch_data(
        &self,
        state: &dyn StateAccess,
        request: FetchRequest<'_>,
    ) -> Option<Value> {
        let existing = state
            .get_in(&request.existing_state_path)
            .filter(|v| !v.is_null());

        if !request.reload {
            if let (Some(data), Some(properties)) = (&existing, &request.properties) {
                if has_properties(data, properties) {
                    debug!(
                        "Skipping fetch of {}: cached data has {properties:?}",
                        request.request_state_path
                    );
                    return existing;
                }
            }
        }

        let path = self.fetch_path(&request.request_state_path);
        let stale = request.reload
            || state
                .request_status(&path)
                .is_none_or(|status| status.is_error());
        if !stale {
            debug!("Fetch {path} already tracked, returning cached data");
            return existing;
        }

        state.dispatch(set_request_state(&path, RequestStatus::Loading));
        match (request.get_data)().await {
            Ok(data) => {
                let loaded = set_request_state(&path, RequestStatus::Loaded);
                match request.on_data {
                    Some(to_action) => state.dispatch_batch(vec![to_action(&data), loaded]),
                    None => state.dispatch(loaded),
                }
                Some(data)
            }
            Err(e) => {
                let err = RequestError::Fetch(e);
                error!("Request {path}: {err}");
                state.dispatch(set_request_state(
                    &path,
                    RequestStatus::error(err.to_status_value()),
                ));
                existing
            }
        }
    }

    /// Performs a write, then invalidates dependent reads.
    ///
    /// Clearing a dependent status does not touch its cached data; the next
    /// fetch of that path simply stops seeing a `Loading`/`Loaded` guard.
    /// Returns the write's result, or the existing data (if a path was
    /// given) when the write fails.
    pub async fn update_data(
        &self,
        state: &dyn StateAccess,
        request: UpdateRequest<'_>,
    ) -> Option<Value> {
        let existing = request
            .existing_state_path
            .as_ref()
            .and_then(|p| state.get_in(p))
            .filter(|v| !v.is_null());
        let path = self.update_path(&request.request_state_path);

        state.dispatch(set_request_state(&path, RequestStatus::Loading));
        match (request.put_data)().await {
            Ok(data) => {
                state.dispatch(set_request_state(&path, RequestStatus::Loaded));
                for dependent in &request.dependent_request_state_paths {
                    debug!("Invalidating {dependent} after {path}");
                    state.dispatch(clear_request_state(dependent));
                }
                Some(data)
            }
            Err(e) => {
                let err = RequestError::Update(e);
                error!("Request {path}: {err}");
                state.dispatch(set_request_state(
                    &path,
                    RequestStatus::error(err.to_status_value()),
                ));
                existing
            }
        }
    }
}

/// True if every named property is a key of `data`.
///
/// A null field counts as present; only a missing key makes data inadequate.
fn has_properties(data: &Value, properties: &[String]) -> bool {
    properties.iter().all(|p| data.get(p.as_str()).is_some())
}

/// [`RequestCoordinator::fetch_data`] with the default configuration.
pub async fn fetch_data(state: &dyn StateAccess, request: FetchRequest<'_>) -> Option<Value> {
    RequestCoordinator::default().fetch_data(state, request).await
}

/// [`RequestCoordinator::update_data`] with the default configuration.
pub async fn update_data(state: &dyn StateAccess, request: UpdateRequest<'_>) -> Option<Value> {
    RequestCoordinator::default().update_data(state, request).await
}
