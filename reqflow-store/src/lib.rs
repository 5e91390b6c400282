//! Single-writer state store for reqflow.
//!
//! # Architecture
//!
//! All application state lives in one JSON [`StateTree`]. A [`Store`] owns
//! it and is the only writer: every change is an [`Action`] run through one
//! synchronous reducer, and readers work against immutable `Arc` snapshots.
//!
//! ## Components
//!
//! - **Tree**: path-addressed reads and writes over the JSON state
//! - **Requests**: the request-state map at `requests.states`, changed only
//!   by `set_request_state` / `clear_request_state` actions
//! - **Store**: dispatch, batched dispatch, snapshots, change notification
//! - **Selector**: memoized derived reads
//!
//! # Example
//!
//! ```
//! use reqflow_model::CombineReducers;
//! use reqflow_store::{set_request_state, StateAccess, Store, StoreConfig};
//! use reqflow_types::{RequestPath, RequestStatus};
//!
//! let store = Store::new(StoreConfig::default(), CombineReducers::new());
//! let path = RequestPath::from(["metadata", "tables", "fetch"]);
//!
//! store.dispatch(set_request_state(&path, RequestStatus::Loading));
//! assert_eq!(store.request_status(&path), Some(RequestStatus::Loading));
//! ```
//!
//! [`Action`]: reqflow_types::Action

mod config;
mod error;
pub mod requests;
mod selector;
mod store;
pub mod tree;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use requests::{
    clear_request_state, set_request_state, RequestStateChange, RequestStateReducer,
    CLEAR_REQUEST_STATE, SET_REQUEST_STATE,
};
pub use selector::MemoizedSelector;
pub use store::{StateAccess, Store, StoreHandle};
pub use tree::StateTree;
