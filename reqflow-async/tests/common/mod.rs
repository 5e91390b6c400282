//! Shared test helpers for the async coordinators.

#![allow(dead_code)]

use futures::future::{ready, Ready};
use reqflow_model::{CombineReducers, HandleEntities};
use reqflow_store::{StateAccess, StateTree, Store, StoreConfig, StoreHandle};
use reqflow_types::{Action, RequestPath};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Root reducer used by every test store: merges `user` entities and logs
/// every applied action kind under `log`.
pub fn app_reducer() -> CombineReducers {
    CombineReducers::new()
        .slice(
            "entities",
            CombineReducers::new()
                .slice("user", HandleEntities::from_pattern("^user/", "user").unwrap()),
        )
        .slice("log", |state: Value, action: &Action| {
            let mut kinds = state.as_array().cloned().unwrap_or_default();
            kinds.push(json!(action.kind));
            Value::Array(kinds)
        })
}

pub fn make_store() -> Arc<Store> {
    Arc::new(Store::new(StoreConfig::default(), app_reducer()))
}

/// Store seeded with user 1 = `{"name": "x"}`.
pub fn store_with_user() -> Arc<Store> {
    let initial = StateTree::from_value(json!({"entities": {"user": {"1": {"name": "x"}}}}));
    Arc::new(Store::with_state(StoreConfig::default(), app_reducer(), initial))
}

pub fn handle(store: &Arc<Store>) -> StoreHandle {
    store.clone()
}

pub fn user_path() -> RequestPath {
    RequestPath::from(["entities", "user", "1"])
}

pub fn log_of(store: &Store) -> Vec<String> {
    store
        .get_in(&RequestPath::from(["log"]))
        .and_then(|v| v.as_array().cloned())
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// A data operation that counts its calls and succeeds with `value`.
pub fn ok_data(
    calls: &AtomicUsize,
    value: Value,
) -> impl FnOnce() -> Ready<anyhow::Result<Value>> + Send + '_ {
    move || {
        calls.fetch_add(1, Ordering::SeqCst);
        ready(Ok(value))
    }
}

/// A data operation that counts its calls and fails with `message`.
pub fn failing_data<'a>(
    calls: &'a AtomicUsize,
    message: &'static str,
) -> impl FnOnce() -> Ready<anyhow::Result<Value>> + Send + 'a {
    move || {
        calls.fetch_add(1, Ordering::SeqCst);
        ready(Err(anyhow::anyhow!(message)))
    }
}
