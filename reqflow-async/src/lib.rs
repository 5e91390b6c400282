//! Async request coordination for reqflow.
//!
//! Standardizes how an application talks to a remote API through a
//! [`StateAccess`](reqflow_store::StateAccess) container:
//!
//! - **Fetch**: [`RequestCoordinator::fetch_data`] fetches only when the
//!   tracked slot is absent, errored, or a reload is forced, and skips the
//!   request entirely when cached data already has the required fields.
//! - **Update**: [`RequestCoordinator::update_data`] performs a write and
//!   then clears the statuses of dependent reads.
//! - **Tasks**: a [`Task`] is a maybe-async unit of work. Creators that
//!   return tasks are decorated by plain functions
//!   ([`with_request_state`], [`with_analytics`]) and finally turned into an
//!   [`ActionCreator`] that dispatches the outcome as one tagged action.
//!
//! Neither coordinator ever returns an error: failures are recorded as an
//! `Error` status, logged, and turned into "return the previous data".
//!
//! # Example
//!
//! ```
//! use reqflow_async::{FetchRequest, RequestCoordinator};
//! use reqflow_model::CombineReducers;
//! use reqflow_store::{StateAccess, Store, StoreConfig};
//! use reqflow_types::{Action, RequestPath, RequestStatus};
//! use serde_json::json;
//!
//! # futures::executor::block_on(async {
//! let store = Store::new(StoreConfig::default(), CombineReducers::new());
//! let coordinator = RequestCoordinator::default();
//!
//! let request = FetchRequest::new(
//!     RequestPath::from(["metadata", "tables"]),
//!     RequestPath::from(["metadata", "tables"]),
//!     || async { anyhow::Ok(json!({"1": {"name": "orders"}})) },
//! )
//! .on_data(|tables| Action::new("metadata/FETCH_TABLES", tables.clone()));
//! let data = coordinator.fetch_data(&store, request).await;
//! assert_eq!(data, Some(json!({"1": {"name": "orders"}})));
//!
//! let fetch = RequestPath::from(["metadata", "tables", "fetch"]);
//! assert_eq!(store.request_status(&fetch), Some(RequestStatus::Loaded));
//! # });
//! ```

mod analytics;
mod config;
mod coordinator;
mod error;
mod task;
mod wrapper;

pub use analytics::{with_analytics, AnalyticsEvent, AnalyticsField, AnalyticsSink, AnalyticsSpec};
pub use config::CoordinatorConfig;
pub use coordinator::{fetch_data, update_data, FetchRequest, RequestCoordinator, UpdateRequest};
pub use error::{error_payload, RequestError, RequestResult};
pub use task::{Creator, Task, TaskFuture, Thunk};
pub use wrapper::{
    create_thunk_action, with_request_state, ActionCreator, CreatorBuilder, Dispatched,
};
