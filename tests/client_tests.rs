mod common;

use common::{client, config, path_of, ScriptedTransport, SESSION_TOKEN};
use std::time::Duration;
use verkada_client::transport::RequestBody;
use verkada_client::{RetryPolicy, VerkadaError};

#[test]
fn test_token_is_exchanged_once_and_attached() {
    let transport = ScriptedTransport::new();
    transport.reply(200, r#"{"devices":[]}"#).reply(200, r#"{"devices":[]}"#);
    let (client, _) = client(&transport, config());

    client.vx().get_vx_devices().unwrap();
    client.vx().get_vx_devices().unwrap();

    assert_eq!(transport.token_calls(), 1);
    for request in transport.requests() {
        assert_eq!(request.header_value("x-verkada-auth"), Some(SESSION_TOKEN));
        assert_eq!(request.header_value("accept"), Some("application/json"));
        assert_eq!(request.header_value("content-type"), None);
    }
    assert_eq!(client.session_token().unwrap().token, SESSION_TOKEN);
}

#[test]
fn test_rate_limited_request_is_retried_with_backoff() {
    let transport = ScriptedTransport::new();
    transport
        .reply(429, "slow down")
        .reply(429, "slow down")
        .reply(200, r#"{"devices":[{"device_id":"vx-1"}]}"#);
    let (client, sleeps) = client(&transport, config());

    let devices = client.vx().get_vx_devices().unwrap();

    assert_eq!(devices.devices[0].device_id.as_deref(), Some("vx-1"));
    assert_eq!(transport.requests().len(), 3);
    assert_eq!(
        *sleeps.lock().unwrap(),
        vec![Duration::from_millis(50), Duration::from_millis(100)]
    );
}

#[test]
fn test_rate_limit_retries_are_bounded() {
    let transport = ScriptedTransport::new();
    transport
        .reply(429, "")
        .reply(429, "")
        .reply(429, "")
        .reply(200, "{}");
    let retry = RetryPolicy {
        max_retries: 2,
        ..RetryPolicy::default()
    };
    let (client, sleeps) = client(&transport, config().with_retry(retry));

    let err = client.vx().get_vx_devices().unwrap_err();

    assert!(matches!(err, VerkadaError::RateLimitExceeded { attempts: 3 }));
    assert_eq!(transport.requests().len(), 3);
    assert_eq!(sleeps.lock().unwrap().len(), 2);
}

#[test]
fn test_network_failure_is_not_retried() {
    let transport = ScriptedTransport::new();
    transport.network_error().reply(200, r#"{"devices":[]}"#);
    let (client, sleeps) = client(&transport, config());

    let err = client.vx().get_vx_devices().unwrap_err();

    assert!(matches!(err, VerkadaError::Request(_)));
    assert_eq!(transport.requests().len(), 1);
    assert!(sleeps.lock().unwrap().is_empty());
}

#[test]
fn test_undeclared_response_field_is_a_decode_error() {
    let transport = ScriptedTransport::new();
    transport.reply(200, r#"{"devices":[{"device_id":"vx-1","surprise":true}]}"#);
    let (client, _) = client(&transport, config());

    match client.vx().get_vx_devices().unwrap_err() {
        VerkadaError::Decode { status, body, .. } => {
            assert_eq!(status, 200);
            assert!(body.contains("surprise"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_error_status_carries_body() {
    let transport = ScriptedTransport::new();
    transport.reply(403, r#"{"message":"forbidden"}"#);
    let (client, _) = client(&transport, config());

    let err = client.alarms().get_alarm_devices("site-1").unwrap_err();
    assert_eq!(err.status_code(), Some(403));
    assert!(err.to_string().contains("forbidden"));
}

#[test]
fn test_empty_key_is_rejected() {
    let transport = ScriptedTransport::new();
    let err = verkada_client::Client::with_transport("", config(), transport.clone()).unwrap_err();
    assert!(matches!(err, VerkadaError::Config(_)));
    assert_eq!(transport.token_calls(), 0);
}

#[test]
fn test_json_body_and_content_type() {
    let transport = ScriptedTransport::new();
    transport.reply(200, r#"{"group_id":"g1","name":"Staff","user_ids":null}"#);
    let (client, _) = client(&transport, config());

    let group = client.access().create_access_group("Staff").unwrap();
    assert!(group.user_ids.is_empty());

    let request = &transport.requests()[0];
    assert_eq!(request.method, reqwest::Method::POST);
    assert_eq!(path_of(request), "/access/v1/access_groups/group");
    assert_eq!(request.header_value("content-type"), Some("application/json"));
    match request.body {
        RequestBody::Json(ref bytes) => {
            let json: serde_json::Value = serde_json::from_slice(bytes).unwrap();
            assert_eq!(json, serde_json::json!({"name": "Staff"}));
        }
        ref other => panic!("unexpected body: {other:?}"),
    }
}
