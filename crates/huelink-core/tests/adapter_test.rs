// Integration tests for `HueBridgeAdapter` against a wiremock bridge.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use huelink_core::{
    AdapterError, BridgeConfig, CharacteristicWrite, HueBridgeAdapter, LightRecord, LightRef,
    SkipReason, WriteOutcome,
};

const TOKEN: &str = "252deadbeef0bf3f34c7ecb810e832f";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HueBridgeAdapter) {
    let server = MockServer::start().await;
    let adapter = adapter_for(&server.uri());
    (server, adapter)
}

fn adapter_for(uri: &str) -> HueBridgeAdapter {
    let mut config = BridgeConfig::new(
        uri.parse().expect("mock server URI"),
        SecretString::from(TOKEN.to_string()),
    );
    config.timeout = Duration::from_secs(5);
    HueBridgeAdapter::new(config).expect("adapter construction")
}

/// Mount the two-light enumeration fixture from the host scenario:
/// "1" -> Lamp, "2" -> Strip.
async fn mount_two_lights(server: &MockServer) {
    // Raw body so the fixture's key order is the wire order.
    let body = concat!(
        r#"{"1": {"name": "Lamp", "modelid": "LCT007"},"#,
        r#" "2": {"name": "Strip", "modelid": "LST001"}}"#,
    );

    Mock::given(method("GET"))
        .and(path(format!("/api/{TOKEN}/lights")))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

fn write_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!([{ "success": {} }]))
}

// ── Enumeration ─────────────────────────────────────────────────────

#[tokio::test]
async fn enumerate_yields_records_in_bridge_order() {
    let (server, adapter) = setup().await;

    // Bridge reports "2" before "1"; the snapshot must not re-sort.
    let body = concat!(
        r#"{"2": {"name": "Strip", "modelid": "LST001"},"#,
        r#" "1": {"name": "Lamp", "modelid": "LCT007"}}"#,
    );
    Mock::given(method("GET"))
        .and(path(format!("/api/{TOKEN}/lights")))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let snapshot = adapter.enumerate().await.expect("enumerate");

    assert_eq!(snapshot.len(), 2);
    let names: Vec<&str> = snapshot.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Strip", "Lamp"]);

    let lamp = snapshot.get("1").expect("light 1");
    assert_eq!(lamp.id, "1");
    assert_eq!(lamp.name, "Lamp");
    assert_eq!(lamp.model.as_deref(), Some("LCT007"));
}

#[tokio::test]
async fn enumerate_propagates_transport_failure() {
    // No server running at this address: connection refused.
    let adapter = adapter_for("http://127.0.0.1:9");

    let result = adapter.enumerate().await;
    assert!(
        matches!(result, Err(AdapterError::ConnectionFailed { .. })),
        "expected ConnectionFailed, got: {result:?}"
    );
}

#[tokio::test]
async fn enumerate_surfaces_bad_token_as_auth_failure() {
    let (server, adapter) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "error": { "type": 1, "address": "/", "description": "unauthorized user" } }
        ])))
        .mount(&server)
        .await;

    let result = adapter.enumerate().await;
    assert!(
        matches!(result, Err(AdapterError::AuthenticationFailed { .. })),
        "expected AuthenticationFailed, got: {result:?}"
    );
}

// ── Characteristic writes ───────────────────────────────────────────

#[tokio::test]
async fn brightness_write_converts_to_bridge_units() {
    let (server, adapter) = setup().await;
    mount_two_lights(&server).await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/{TOKEN}/lights/1/state")))
        .and(body_json(json!({ "bri": 128 })))
        .respond_with(write_ok())
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = adapter.enumerate().await.expect("enumerate");
    let lamp = snapshot.resolve("1");

    let outcome = adapter
        .write_characteristic(&lamp, CharacteristicWrite::Brightness(50))
        .outcome()
        .await;
    assert!(outcome.is_sent(), "expected Sent, got: {outcome:?}");
}

#[tokio::test]
async fn power_and_hue_and_identify_payloads() {
    let (server, adapter) = setup().await;
    mount_two_lights(&server).await;

    let state_path = format!("/api/{TOKEN}/lights/2/state");

    Mock::given(method("PUT"))
        .and(path(state_path.clone()))
        .and(body_json(json!({ "on": false })))
        .respond_with(write_ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(state_path.clone()))
        .and(body_json(json!({ "hue": 40000 })))
        .respond_with(write_ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(state_path))
        .and(body_json(json!({ "alert": "select" })))
        .respond_with(write_ok())
        .expect(1)
        .mount(&server)
        .await;

    let strip = adapter.enumerate().await.expect("enumerate").resolve("2");

    for write in [
        CharacteristicWrite::Power(false),
        CharacteristicWrite::Hue(40000),
        CharacteristicWrite::Identify,
    ] {
        let outcome = adapter.write_characteristic(&strip, write).outcome().await;
        assert!(outcome.is_sent(), "{write:?} outcome: {outcome:?}");
    }
}

#[tokio::test]
async fn write_failure_is_reported_not_raised() {
    let (server, adapter) = setup().await;
    mount_two_lights(&server).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let lamp = adapter.enumerate().await.expect("enumerate").resolve("1");

    // The call itself returns a handle; the failure is only visible
    // through the outcome.
    let outcome = adapter
        .write_characteristic(&lamp, CharacteristicWrite::Power(true))
        .outcome()
        .await;
    assert!(
        matches!(outcome, WriteOutcome::Failed(_)),
        "expected Failed, got: {outcome:?}"
    );
}

#[tokio::test]
async fn unresolved_light_is_a_no_op() {
    let (server, adapter) = setup().await;

    // Any request at all would be a contract violation.
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let ghost = LightRef::Unresolved {
        name: "Hallway".into(),
    };
    let outcome = adapter
        .write_characteristic(&ghost, CharacteristicWrite::Power(true))
        .outcome()
        .await;

    assert!(
        matches!(outcome, WriteOutcome::Skipped(SkipReason::UnresolvedLight)),
        "expected Skipped(UnresolvedLight), got: {outcome:?}"
    );
    server.verify().await;
}

#[tokio::test]
async fn unrecognized_kind_produces_no_request() {
    let (server, adapter) = setup().await;
    mount_two_lights(&server).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let lamp = adapter.enumerate().await.expect("enumerate").resolve("1");

    for kind in ["color_temperature", "BRIGHTNESs_", "xy", ""] {
        let outcome = adapter.write_named(&lamp, kind, &json!(42)).outcome().await;
        assert!(
            matches!(
                outcome,
                WriteOutcome::Skipped(SkipReason::UnknownCharacteristic)
            ),
            "kind {kind:?} outcome: {outcome:?}"
        );
    }
    server.verify().await;
}

#[tokio::test]
async fn named_write_dispatches_case_insensitively() {
    let (server, adapter) = setup().await;
    mount_two_lights(&server).await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/{TOKEN}/lights/1/state")))
        .and(body_json(json!({ "sat": 255 })))
        .respond_with(write_ok())
        .expect(1)
        .mount(&server)
        .await;

    let lamp = adapter.enumerate().await.expect("enumerate").resolve("1");

    let outcome = adapter
        .write_named(&lamp, "Saturation", &json!(100))
        .outcome()
        .await;
    assert!(outcome.is_sent(), "expected Sent, got: {outcome:?}");
}

#[tokio::test]
async fn malformed_value_is_skipped() {
    let (server, adapter) = setup().await;
    mount_two_lights(&server).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let lamp = adapter.enumerate().await.expect("enumerate").resolve("1");

    let outcome = adapter
        .write_named(&lamp, "power", &json!("definitely on"))
        .outcome()
        .await;
    assert!(
        matches!(outcome, WriteOutcome::Skipped(SkipReason::InvalidValue)),
        "expected Skipped(InvalidValue), got: {outcome:?}"
    );
    server.verify().await;
}

#[test]
fn write_outside_runtime_fails_without_panicking() {
    // Plain #[test]: no ambient tokio runtime when the write is issued.
    let adapter = adapter_for("http://127.0.0.1:9");
    let lamp = LightRef::Resolved(LightRecord {
        id: "1".into(),
        name: "Lamp".into(),
        model: None,
    });

    let handle = adapter.write_characteristic(&lamp, CharacteristicWrite::Power(true));

    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let outcome = rt.block_on(handle.outcome());
    assert!(
        matches!(outcome, WriteOutcome::Failed(AdapterError::Internal(_))),
        "expected Failed(Internal), got: {outcome:?}"
    );
}

// ── End-to-end host scenario ────────────────────────────────────────

#[tokio::test]
async fn host_scenario_enumerate_then_write_brightness() {
    let (server, adapter) = setup().await;
    mount_two_lights(&server).await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/{TOKEN}/lights/1/state")))
        .and(body_json(json!({ "bri": 128 })))
        .respond_with(write_ok())
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = adapter.enumerate().await.expect("enumerate");
    let names: Vec<&str> = snapshot.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Lamp", "Strip"]);

    // Host-side wiring: string-keyed write against the first record.
    let lamp = snapshot.resolve("1");
    let outcome = adapter
        .write_named(&lamp, "brightness", &json!(50))
        .outcome()
        .await;
    assert!(outcome.is_sent(), "expected Sent, got: {outcome:?}");
    server.verify().await;
}
