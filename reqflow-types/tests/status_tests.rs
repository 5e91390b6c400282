use pretty_assertions::assert_eq;
use reqflow_types::RequestStatus;
use serde_json::json;

#[test]
fn loading_serializes_with_state_tag() {
    assert_eq!(RequestStatus::Loading.to_value(), json!({"state": "LOADING"}));
    assert_eq!(RequestStatus::Loaded.to_value(), json!({"state": "LOADED"}));
}

#[test]
fn error_carries_value() {
    let status = RequestStatus::error(json!({"message": "boom"}));
    assert_eq!(
        status.to_value(),
        json!({"state": "ERROR", "error": {"message": "boom"}})
    );
    assert_eq!(status.error_value(), Some(&json!({"message": "boom"})));
}

#[test]
fn predicates() {
    assert!(RequestStatus::Loading.is_loading());
    assert!(RequestStatus::Loaded.is_loaded());
    assert!(RequestStatus::error("x").is_error());
    assert!(!RequestStatus::Loaded.is_error());
    assert_eq!(RequestStatus::Loaded.error_value(), None);
}

#[test]
fn from_value_reads_back() {
    let status = RequestStatus::error("nope");
    assert_eq!(RequestStatus::from_value(&status.to_value()), Some(status));
    assert_eq!(
        RequestStatus::from_value(&json!({"state": "LOADING"})),
        Some(RequestStatus::Loading)
    );
}

#[test]
fn from_value_ignores_null_and_garbage() {
    assert_eq!(RequestStatus::from_value(&json!(null)), None);
    assert_eq!(RequestStatus::from_value(&json!({"state": "PENDING"})), None);
    assert_eq!(RequestStatus::from_value(&json!(42)), None);
}

#[test]
fn error_without_value_defaults_to_null() {
    assert_eq!(
        RequestStatus::from_value(&json!({"state": "ERROR"})),
        Some(RequestStatus::Error { error: json!(null) })
    );
}
