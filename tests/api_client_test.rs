//! BlogApiClient over the reqwest adapter, against a wiremock server.

mod common;

use common::{posts_fixture, users_fixture};
use postboard::adapters::ReqwestHttpClient;
use postboard::api::BlogApiClient;
use postboard::error::NetworkError;
use postboard::models::{PostDraft, PostId};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BlogApiClient<ReqwestHttpClient> {
    BlogApiClient::new(ReqwestHttpClient::new(), server.uri())
}

#[tokio::test]
async fn test_fetch_posts_sends_accept_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_fixture()))
        .mount(&mock_server)
        .await;

    let posts = client_for(&mock_server).fetch_posts().await.unwrap();

    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].id, Some(PostId::from(1)));
    assert_eq!(posts[2].user_id, 1);
}

#[tokio::test]
async fn test_fetch_users_ignores_extra_fields() {
    let mock_server = MockServer::start().await;
    common::mount_users(&mock_server, users_fixture()).await;

    let users = client_for(&mock_server).fetch_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[1].name, "Ervin Howell");
}

#[tokio::test]
async fn test_create_post_body_and_echo() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({"title": "Hello", "body": "World", "userId": 3})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 101,
            "title": "Hello",
            "body": "World",
            "userId": "3"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let new_post = PostDraft::new("Hello", "World", Some(3)).validate().unwrap();
    let echo = client_for(&mock_server).create_post(&new_post).await.unwrap();

    assert_eq!(echo.id, Some(PostId::from(101)));
    assert_eq!(echo.user_id, 3);
}

#[tokio::test]
async fn test_delete_accepts_any_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/posts/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).delete_post(&PostId::from(7)).await;
    assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
}

#[tokio::test]
async fn test_error_status_carries_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch_posts().await.unwrap_err();
    assert_eq!(
        err,
        NetworkError::HttpStatus {
            status: 503,
            message: "maintenance".to_string()
        }
    );
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    // Nothing listens on port 9 locally
    let client = BlogApiClient::new(ReqwestHttpClient::new(), "http://127.0.0.1:9");

    let err = client.fetch_users().await.unwrap_err();
    assert!(
        matches!(err, NetworkError::ConnectionFailed { .. } | NetworkError::Other { .. }),
        "unexpected error: {:?}",
        err
    );
}
