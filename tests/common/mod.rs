//! Shared fixtures for the controller integration tests
//!
//! Every test gets its own wiremock server and an [`AppController`] wired to
//! it with instant transitions.

#![allow(dead_code)]

use onepass::config::{ServerProfile, Transitions};
use onepass::{AppController, MockLineStream, MockRenderStream, Session};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "k3y";

pub type TestApp = AppController<MockLineStream, MockRenderStream>;

/// Controller against `server` with no input and a captured output buffer
pub fn create_app(server: &MockServer) -> TestApp {
    create_app_with_input(server, MockLineStream::empty(), MockRenderStream::new())
}

pub fn create_app_with_input(
    server: &MockServer,
    line_stream: MockLineStream,
    render_stream: MockRenderStream,
) -> TestApp {
    let profile = ServerProfile::for_server(server.uri()).with_transitions(Transitions::instant());
    AppController::with_io_streams(profile, line_stream, render_stream)
        .expect("controller should build for a wiremock server")
}

/// Controller that already holds a valid session
pub fn create_logged_in_app(server: &MockServer) -> TestApp {
    let mut app = create_app(server);
    app.set_session(Session::with_api_key(API_KEY));
    app
}

/// 200 response carrying `result` in the standard envelope
pub fn ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "error": null, "result": result }))
}

/// Error response with an error code and no result
pub fn error(status: u16, code: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "error": code, "result": null }))
}

pub fn entry_summary(id: u64, title: &str, username: &str) -> Value {
    json!({ "id": id, "title": title, "username": username })
}

/// Serve the auth status for the test session
pub async fn mount_auth_status(server: &MockServer, username: &str) {
    Mock::given(method("GET"))
        .and(path("/api/auth/status"))
        .and(query_param("api_key", API_KEY))
        .respond_with(ok(json!({ "username": username })))
        .mount(server)
        .await;
}

/// Serve the vault list for one sort order
pub async fn mount_vault(server: &MockServer, sort_by: &str, entries: Value) {
    Mock::given(method("GET"))
        .and(path("/api/vault"))
        .and(query_param("api_key", API_KEY))
        .and(query_param("sort_by", sort_by))
        .respond_with(ok(entries))
        .mount(server)
        .await;
}

/// Mount everything the vault page needs to load
pub async fn mount_vault_page(server: &MockServer, entries: Value) {
    mount_auth_status(server, "alice").await;
    mount_vault(server, "title", entries).await;
}

pub async fn mount_entry(server: &MockServer, id: u64, entry: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/vault/{id}")))
        .and(query_param("api_key", API_KEY))
        .respond_with(ok(entry))
        .mount(server)
        .await;
}

/// Answer every request with 401, as a server does for an expired session
pub async fn mount_expired_session(server: &MockServer) {
    Mock::given(wiremock::matchers::any())
        .respond_with(error(401, "KeyInvalid"))
        .mount(server)
        .await;
}
