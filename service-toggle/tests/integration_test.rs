//! Integration tests for the service toggle.
//!
//! These follow a configuration from the editor through the trigger source's
//! storage to the service lifecycle.

use std::sync::Arc;

use serde_json::json;
use service_toggle::config::DescriptionConfig;
use service_toggle::infrastructure::SledConfigurationStore;
use service_toggle::payload_codec;
use service_toggle::port::ConfigurationHandOff;
use service_toggle::test_utils::{LifecycleCall, RecordingHandOff, RecordingServiceLifecycle};
use service_toggle::{
    CommandDispatcher, ConfigEditor, ConfigPayload, OpaqueBundle, ServiceContext,
    ServiceToggleHandler, ToggleEvent,
};
use tempfile::TempDir;

fn descriptions() -> DescriptionConfig {
    DescriptionConfig {
        on: "Switch on proxy".to_string(),
        off: "Switch off proxy".to_string(),
    }
}

/// Run every event through a fresh handler and return what reached the lifecycle.
async fn deliver(events: Vec<ToggleEvent>) -> Arc<RecordingServiceLifecycle> {
    let lifecycle = Arc::new(RecordingServiceLifecycle::new());
    let ctx = ServiceContext {
        service_name: "proxy".to_string(),
        ..Default::default()
    };
    let (dispatcher, worker) = CommandDispatcher::spawn(lifecycle.clone(), ctx);
    let handler = ServiceToggleHandler::new(dispatcher);

    for event in &events {
        handler.on_event(event);
    }
    drop(handler);
    worker.await.unwrap();

    lifecycle
}

#[test]
fn test_codec_round_trip_and_defaults() {
    for state in [true, false] {
        let payload = ConfigPayload::new(state);
        assert_eq!(payload_codec::decode(Some(&payload_codec::encode(payload))), payload);
    }

    assert!(!payload_codec::decode(None).switch_state());
    let no_key = OpaqueBundle::from_value(json!({"something_else": true}));
    assert!(!payload_codec::decode(Some(&no_key)).switch_state());
}

#[tokio::test]
async fn test_switch_on_starts_exactly_once() {
    let event = ToggleEvent::with_bundle(OpaqueBundle::from_value(json!({"switch_state": true})));
    let lifecycle = deliver(vec![event]).await;

    assert_eq!(lifecycle.count(LifecycleCall::Start).await, 1);
    assert_eq!(lifecycle.count(LifecycleCall::Stop).await, 0);
}

#[tokio::test]
async fn test_switch_off_stops_exactly_once() {
    let event = ToggleEvent::with_bundle(OpaqueBundle::from_value(json!({"switch_state": false})));
    let lifecycle = deliver(vec![event]).await;

    assert_eq!(lifecycle.count(LifecycleCall::Stop).await, 1);
    assert_eq!(lifecycle.count(LifecycleCall::Start).await, 0);
}

#[tokio::test]
async fn test_absent_bundle_behaves_like_switch_off() {
    let lifecycle = deliver(vec![ToggleEvent::empty()]).await;
    assert_eq!(lifecycle.calls().await, vec![LifecycleCall::Stop]);
}

#[tokio::test]
async fn test_failing_lifecycle_does_not_affect_later_events() {
    let lifecycle = Arc::new(RecordingServiceLifecycle::failing());
    let (dispatcher, worker) = CommandDispatcher::spawn(lifecycle.clone(), ServiceContext::default());
    let handler = ServiceToggleHandler::new(dispatcher);

    let on = ToggleEvent::with_bundle(OpaqueBundle::from_value(json!({"switch_state": true})));
    handler.on_event(&on);
    handler.on_event(&ToggleEvent::empty());
    drop(handler);
    worker.await.unwrap();

    assert_eq!(
        lifecycle.calls().await,
        vec![LifecycleCall::Start, LifecycleCall::Stop]
    );
}

#[test]
fn test_editor_initialize_and_confirm() {
    let editor = ConfigEditor::new(descriptions());
    let incoming = ToggleEvent::with_bundle(OpaqueBundle::from_value(json!({"switch_state": true})));

    let state = editor.initialize(Some(&incoming));
    assert!(state.checked);

    let result = editor.on_confirm(state);
    assert_eq!(result.description, "Switch on proxy");
    assert_eq!(result.bundle.into_value(), json!({"switch_state": true}));
}

#[test]
fn test_cancel_leaves_stored_configuration_untouched() {
    let editor = ConfigEditor::new(descriptions());
    let hand_off = RecordingHandOff::new();

    let first = editor.on_confirm(editor.initialize(None));
    hand_off.save(&first).unwrap();
    assert_eq!(hand_off.save_count(), 1);

    // A second edit that is cancelled never reaches the hand-off.
    let incoming = ToggleEvent::with_bundle(first.bundle.clone());
    let _state = editor.initialize(Some(&incoming));
    editor.on_cancel();

    assert_eq!(hand_off.save_count(), 1);
    let stored = hand_off.load().unwrap().expect("stored");
    assert_eq!(stored.description, "Switch off proxy");
    assert_eq!(stored.bundle, first.bundle);
}

#[tokio::test]
async fn test_saved_configuration_drives_later_delivery() {
    let temp_dir = TempDir::new().unwrap();
    let store = SledConfigurationStore::open(temp_dir.path().join("trigger")).unwrap();
    let editor = ConfigEditor::new(descriptions());

    let result = editor.on_confirm(service_toggle::UiState { checked: true });
    store.save(&result).unwrap();

    // Later, the trigger source hands the saved bundle back.
    let stored = store.load().unwrap().expect("stored");
    let lifecycle = deliver(vec![ToggleEvent::with_bundle(stored.bundle)]).await;

    assert_eq!(lifecycle.calls().await, vec![LifecycleCall::Start]);
}

#[tokio::test]
async fn test_bundle_from_older_client_with_extra_keys() {
    let legacy = OpaqueBundle::from_value(json!({
        "switch_state": true,
        "blurb": "Switch on proxy",
    }));

    let editor = ConfigEditor::new(descriptions());
    assert!(editor.initialize(Some(&ToggleEvent::with_bundle(legacy.clone()))).checked);

    let lifecycle = deliver(vec![ToggleEvent::with_bundle(legacy)]).await;
    assert_eq!(lifecycle.calls().await, vec![LifecycleCall::Start]);
}
