//! End-to-end lookup tests against a mock remote database
//!
//! These tests drive the full authorize flow: request context in, HTTP GET
//! against a mock server, JSON decoding, and attribute injection. They cover:
//! - successful lookups and the exact attribute writes they produce
//! - requests without a username (no-op, no HTTP traffic)
//! - malformed response bodies (invalid JSON, wrong shape, missing fields)
//! - transport failures and the timeout bound

use httpmock::prelude::*;
use remotedb::{RemoteDbConfig, RemoteDbModule};
use remotedb_core::{
    Attribute, AttributeType, AuthorizeModule, AuthorizeOutcome, RequestContext,
};
use std::time::{Duration, Instant};

/// Helper to build a request context carrying a username and MAC
fn create_request(username: Option<&str>, mac: Option<&str>) -> RequestContext {
    let mut request = RequestContext::new();
    if let Some(username) = username {
        request.attributes.add(
            Attribute::string(AttributeType::UserName, username)
                .expect("Failed to create User-Name"),
        );
    }
    if let Some(mac) = mac {
        request.attributes.add(
            Attribute::string(AttributeType::CallingStationId, mac)
                .expect("Failed to create Calling-Station-Id"),
        );
    }
    request
}

/// Helper to build a module pointed at the mock server
fn create_module(server: &MockServer, base: &str, timeout: u64) -> RemoteDbModule {
    let config = RemoteDbConfig {
        ip: server.host(),
        port: server.port(),
        base: base.to_string(),
        timeout,
        log_level: None,
    };
    RemoteDbModule::new(config).expect("Failed to create module")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_successful_lookup_injects_attributes() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/authenticate")
                .query_param("login", "alice")
                .query_param("mac", "AA:BB");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"password":"p","vlan":"7"}"#);
        })
        .await;

    let module = create_module(&server, "/api", 1);
    let mut request = create_request(Some("alice"), Some("AA:BB"));

    let outcome = module.authorize(&mut request);
    assert_eq!(outcome, AuthorizeOutcome::Success);
    mock.assert_async().await;

    // Exactly one control write and the three tunnel attributes
    assert_eq!(request.control.len(), 1);
    assert_eq!(request.reply.len(), 3);

    let password = request
        .control
        .find(AttributeType::NtPassword)
        .expect("NT-Password not set");
    assert_eq!(password.as_string().unwrap(), "p");

    let group_id = request
        .reply
        .find(AttributeType::TunnelPrivateGroupId)
        .expect("Tunnel-Private-Group-Id not set");
    assert_eq!(group_id.as_string().unwrap(), "7");

    let medium = request
        .reply
        .find(AttributeType::TunnelMediumType)
        .expect("Tunnel-Medium-Type not set");
    assert_eq!(medium.as_integer().unwrap(), 6);

    let tunnel_type = request
        .reply
        .find(AttributeType::TunnelType)
        .expect("Tunnel-Type not set");
    assert_eq!(tunnel_type.as_integer().unwrap(), 13);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_mac_sends_empty_parameter() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/authenticate")
                .query_param("login", "bob")
                .query_param("mac", "");
            then.status(200)
                .body(r#"{"password":"secret","vlan":"12"}"#);
        })
        .await;

    let module = create_module(&server, "", 1);
    let mut request = create_request(Some("bob"), None);

    assert_eq!(module.authorize(&mut request), AuthorizeOutcome::Success);
    mock.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_username_is_not_applicable() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/authenticate");
            then.status(200).body(r#"{"password":"p","vlan":"7"}"#);
        })
        .await;

    let module = create_module(&server, "", 1);
    let mut request = create_request(None, Some("AA:BB"));

    let outcome = module.authorize(&mut request);
    assert_eq!(outcome, AuthorizeOutcome::NotApplicable);

    // No HTTP call was made and the request is untouched
    assert_eq!(mock.hits_async().await, 0);
    assert!(request.control.is_empty());
    assert!(request.reply.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_vlan_fails_without_writes() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/authenticate");
            then.status(200).body(r#"{"password":"p"}"#);
        })
        .await;

    let module = create_module(&server, "", 1);
    let mut request = create_request(Some("alice"), Some("AA:BB"));

    assert_eq!(module.authorize(&mut request), AuthorizeOutcome::Failure);
    assert!(request.control.is_empty());
    assert!(request.reply.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_password_fails_without_writes() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/authenticate");
            then.status(200).body(r#"{"vlan":"7"}"#);
        })
        .await;

    let module = create_module(&server, "", 1);
    let mut request = create_request(Some("alice"), Some("AA:BB"));

    assert_eq!(module.authorize(&mut request), AuthorizeOutcome::Failure);
    assert!(request.control.is_empty());
    assert!(request.reply.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_overlong_password_fails_without_writes() {
    let server = MockServer::start_async().await;
    let body = format!(r#"{{"password":"{}","vlan":"7"}}"#, "x".repeat(300));
    server
        .mock_async(|when, then| {
            when.method(GET).path("/authenticate");
            then.status(200).body(body);
        })
        .await;

    let module = create_module(&server, "", 1);
    let mut request = create_request(Some("alice"), Some("AA:BB"));

    // A value beyond the attribute cap must fail the whole lookup, not
    // leave a partially written answer
    assert_eq!(module.authorize(&mut request), AuthorizeOutcome::Failure);
    assert!(request.control.is_empty());
    assert!(request.reply.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_json_body_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/authenticate");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let module = create_module(&server, "", 1);
    let mut request = create_request(Some("alice"), None);

    assert_eq!(module.authorize(&mut request), AuthorizeOutcome::Failure);
    assert!(request.reply.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_object_body_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/authenticate");
            then.status(200).body(r#"[{"password":"p","vlan":"7"}]"#);
        })
        .await;

    let module = create_module(&server, "", 1);
    let mut request = create_request(Some("alice"), None);

    assert_eq!(module.authorize(&mut request), AuthorizeOutcome::Failure);
    assert!(request.reply.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connection_refused_fails() {
    // Bind-then-drop leaves a port nothing is listening on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);

    let config = RemoteDbConfig {
        ip: "127.0.0.1".to_string(),
        port,
        base: String::new(),
        timeout: 1,
        log_level: None,
    };
    let module = RemoteDbModule::new(config).expect("Failed to create module");
    let mut request = create_request(Some("alice"), Some("AA:BB"));

    assert_eq!(module.authorize(&mut request), AuthorizeOutcome::Failure);
    assert!(request.control.is_empty());
    assert!(request.reply.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_slow_endpoint_fails_within_timeout_bound() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/authenticate");
            then.status(200)
                .body(r#"{"password":"p","vlan":"7"}"#)
                .delay(Duration::from_secs(3));
        })
        .await;

    let module = create_module(&server, "", 1);
    let mut request = create_request(Some("alice"), None);

    let start = Instant::now();
    let outcome = module.authorize(&mut request);
    let elapsed = start.elapsed();

    assert_eq!(outcome, AuthorizeOutcome::Failure);
    assert!(request.reply.is_empty());

    // Bounded by the 1s timeout, not the 3s delay; generous upper bound to
    // absorb scheduler jitter
    assert!(elapsed >= Duration::from_millis(900), "gave up too early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(2500), "timeout did not fire: {:?}", elapsed);
}
