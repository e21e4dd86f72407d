//! Common test utilities for integration tests.
//!
//! Fixtures shaped like the remote post and user services, plus a helper
//! that builds a session pointed at a wiremock server.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! mount_posts(&server, posts_fixture()).await;
//! let mut session = session_for(&server);
//! ```

#![allow(dead_code)]

use postboard::adapters::ReqwestHttpClient;
use postboard::config::{BoardConfig, UpdateFallback};
use postboard::session::Session;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Three posts, two by user 1.
pub fn posts_fixture() -> Value {
    json!([
        {"id": 1, "title": "sunt aut facere", "body": "quia et suscipit", "userId": 1},
        {"id": 2, "title": "qui est esse", "body": "est rerum tempore", "userId": 2},
        {"id": 3, "title": "ea molestias", "body": "et iusto sed quo", "userId": 1}
    ])
}

/// Users as the service sends them, extra fields included.
pub fn users_fixture() -> Value {
    json!([
        {"id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz"},
        {"id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv"}
    ])
}

pub async fn mount_posts(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_users(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Session over the real reqwest client, pointed at `server`.
pub fn session_for(server: &MockServer) -> Session<ReqwestHttpClient> {
    session_with_fallback(server, UpdateFallback::Strict)
}

pub fn session_with_fallback(
    server: &MockServer,
    fallback: UpdateFallback,
) -> Session<ReqwestHttpClient> {
    let config = BoardConfig::default()
        .with_api_url(server.uri())
        .with_update_fallback(fallback);
    Session::new(ReqwestHttpClient::new(), config)
}
