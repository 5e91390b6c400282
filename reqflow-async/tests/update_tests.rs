mod common;

use common::{failing_data, make_store, ok_data, store_with_user, user_path};
use pretty_assertions::assert_eq;
use reqflow_async::{fetch_data, update_data, FetchRequest, RequestCoordinator, UpdateRequest};
use reqflow_store::{set_request_state, StateAccess};
use reqflow_types::{RequestPath, RequestStatus};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

fn update_status_path() -> RequestPath {
    user_path().child("update")
}

fn users_list() -> RequestPath {
    RequestPath::from(["entities", "user", "list"])
}

#[tokio::test]
async fn success_returns_result_and_marks_loaded() {
    let store = make_store();
    let calls = AtomicUsize::new(0);

    let request = UpdateRequest::new(user_path(), ok_data(&calls, json!({"name": "new"})));
    let data = update_data(&*store, request).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(data, Some(json!({"name": "new"})));
    assert_eq!(store.request_status(&update_status_path()), Some(RequestStatus::Loaded));
}

#[tokio::test]
async fn success_clears_dependent_paths() {
    let store = make_store();
    let loaded = users_list().child("fetch");
    let errored = RequestPath::from(["entities", "user", "2", "fetch"]);
    store.dispatch(set_request_state(&loaded, RequestStatus::Loaded));
    store.dispatch(set_request_state(&errored, RequestStatus::error("old")));
    let calls = AtomicUsize::new(0);

    let request = UpdateRequest::new(user_path(), ok_data(&calls, json!({})))
        .dependent_request_state_paths([loaded.clone(), errored.clone()]);
    update_data(&*store, request).await;

    assert_eq!(store.request_status(&loaded), None);
    assert_eq!(store.request_status(&errored), None);
}

#[tokio::test]
async fn clearing_a_dependent_lets_the_next_fetch_run() {
    let store = store_with_user();
    let coordinator = RequestCoordinator::default();
    let fetches = AtomicUsize::new(0);
    let updates = AtomicUsize::new(0);

    let first = FetchRequest::new(user_path(), user_path(), ok_data(&fetches, json!({"name": "a"})));
    coordinator.fetch_data(&*store, first).await;

    let update = UpdateRequest::new(RequestPath::from(["entities", "user", "1", "save"]), ok_data(&updates, json!({})))
        .dependent_request_state_paths([coordinator.fetch_path(&user_path())]);
    coordinator.update_data(&*store, update).await;

    let second = FetchRequest::new(user_path(), user_path(), ok_data(&fetches, json!({"name": "b"})));
    let data = coordinator.fetch_data(&*store, second).await;

    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    assert_eq!(data, Some(json!({"name": "b"})));
}

#[tokio::test]
async fn clearing_does_not_touch_cached_data() {
    let store = store_with_user();
    let calls = AtomicUsize::new(0);

    let request = UpdateRequest::new(RequestPath::from(["save"]), ok_data(&calls, json!({})))
        .dependent_request_state_paths([user_path()]);
    update_data(&*store, request).await;

    assert_eq!(store.get_in(&user_path()), Some(json!({"name": "x"})));

    // Field presence still short-circuits the next fetch.
    let fetch = FetchRequest::new(user_path(), user_path(), ok_data(&calls, json!({})))
        .properties(["name"]);
    assert_eq!(fetch_data(&*store, fetch).await, Some(json!({"name": "x"})));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failure_returns_existing_and_records_error() {
    let store = store_with_user();
    let calls = AtomicUsize::new(0);

    let request = UpdateRequest::new(user_path(), failing_data(&calls, "rejected"))
        .existing_state_path(user_path());
    let data = update_data(&*store, request).await;

    assert_eq!(data, Some(json!({"name": "x"})));
    let status = store.request_status(&update_status_path()).unwrap();
    assert_eq!(
        status.error_value(),
        Some(&json!({"kind": "update", "message": "rejected"}))
    );
}

#[tokio::test]
async fn failure_without_existing_path_returns_none() {
    let store = store_with_user();
    let calls = AtomicUsize::new(0);

    let request = UpdateRequest::new(user_path(), failing_data(&calls, "rejected"));
    assert_eq!(update_data(&*store, request).await, None);
}

#[tokio::test]
async fn failure_keeps_dependents() {
    let store = make_store();
    let dependent = users_list().child("fetch");
    store.dispatch(set_request_state(&dependent, RequestStatus::Loaded));
    let calls = AtomicUsize::new(0);

    let request = UpdateRequest::new(user_path(), failing_data(&calls, "rejected"))
        .dependent_request_state_paths([dependent.clone()]);
    update_data(&*store, request).await;

    assert_eq!(store.request_status(&dependent), Some(RequestStatus::Loaded));
}

#[tokio::test]
async fn update_always_runs_even_when_loaded() {
    let store = make_store();
    store.dispatch(set_request_state(&update_status_path(), RequestStatus::Loaded));
    let calls = AtomicUsize::new(0);

    update_data(&*store, UpdateRequest::new(user_path(), ok_data(&calls, json!(1)))).await;
    update_data(&*store, UpdateRequest::new(user_path(), ok_data(&calls, json!(2)))).await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
