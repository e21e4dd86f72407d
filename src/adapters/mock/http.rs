//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors for testing purposes.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET, POST, PUT, DELETE)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST and PUT requests)
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

impl MockResponse {
    /// Shorthand for a JSON response.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }

    /// Shorthand for a response with an empty body.
    pub fn empty(status: u16) -> Self {
        MockResponse::Success(Response::new(status, Bytes::new()))
    }
}

/// Mock HTTP client for testing.
///
/// Responses are looked up by method and URL first, then by URL alone,
/// then by URL prefix, then the default.
///
/// # Example
///
/// ```ignore
/// use postboard::adapters::mock::{MockHttpClient, MockResponse};
/// use postboard::traits::{HttpClient, Headers};
///
/// let client = MockHttpClient::new();
/// client.set_method_response("DELETE", "https://api.test/posts/1", MockResponse::empty(200));
///
/// client.delete("https://api.test/posts/1", &Headers::new()).await?;
/// assert_eq!(client.get_requests()[0].method, "DELETE");
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses keyed by "METHOD url"
    method_responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Configured responses keyed by URL (any method)
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            method_responses: Arc::new(Mutex::new(HashMap::new())),
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a URL regardless of method.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a response for one method on a URL.
    pub fn set_method_response(&self, method: &str, url: &str, response: MockResponse) {
        let mut responses = self.method_responses.lock().unwrap();
        responses.insert(Self::method_key(method, url), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Clear all configured responses.
    pub fn clear_responses(&self) {
        self.method_responses.lock().unwrap().clear();
        self.responses.lock().unwrap().clear();
        *self.default_response.lock().unwrap() = None;
    }

    fn method_key(method: &str, url: &str) -> String {
        format!("{} {}", method.to_ascii_uppercase(), url)
    }

    /// Record a request.
    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    /// Get the response for a request.
    fn get_response(&self, method: &str, url: &str) -> Option<MockResponse> {
        if let Some(response) = self
            .method_responses
            .lock()
            .unwrap()
            .get(&Self::method_key(method, url))
        {
            return Some(response.clone());
        }

        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Longest matching prefix wins so "/posts" does not shadow "/posts/1"
        if let Some((_, response)) = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
        {
            return Some(response.clone());
        }

        self.default_response.lock().unwrap().clone()
    }

    fn respond(&self, method: &str, url: &str) -> Result<Response, HttpError> {
        match self.get_response(method, url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for {} {}",
                method, url
            ))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.respond("GET", url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.respond("POST", url)
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("PUT", url, headers, Some(body.to_string()));
        self.respond("PUT", url)
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("DELETE", url, headers, None);
        self.respond("DELETE", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/posts",
            MockResponse::Success(Response::new(200, Bytes::from("[]"))),
        );

        let response = client
            .get("https://example.com/posts", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Bytes::from("[]"));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, "https://example.com/posts");
    }

    #[tokio::test]
    async fn test_method_response_wins_over_url_response() {
        let client = MockHttpClient::new();
        client.set_response("https://example.com/posts", MockResponse::json(200, serde_json::json!([])));
        client.set_method_response(
            "post",
            "https://example.com/posts",
            MockResponse::json(201, serde_json::json!({"id": 101})),
        );

        let created = client
            .post("https://example.com/posts", "{}", &Headers::new())
            .await
            .unwrap();
        assert_eq!(created.status, 201);

        let listed = client
            .get("https://example.com/posts", &Headers::new())
            .await
            .unwrap();
        assert_eq!(listed.status, 200);
    }

    #[tokio::test]
    async fn test_error_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/posts",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        let result = client.get("https://example.com/posts", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_put_records_body() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::empty(200));

        client
            .put("https://example.com/posts/1", r#"{"id":"1"}"#, &Headers::new())
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"id":"1"}"#));
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client
            .delete("https://example.com/posts/1", &Headers::new())
            .await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_longest_prefix_match() {
        let client = MockHttpClient::new();
        client.set_response("https://example.com/", MockResponse::empty(404));
        client.set_response("https://example.com/posts/", MockResponse::empty(200));

        let response = client
            .get("https://example.com/posts/7", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[test]
    fn test_clear_responses() {
        let client = MockHttpClient::new();
        client.set_response("https://example.com", MockResponse::empty(200));
        client.set_default_response(MockResponse::empty(500));

        client.clear_responses();

        assert!(client.get_response("GET", "https://example.com").is_none());
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::empty(200));

        let cloned = client.clone();
        cloned
            .get("https://example.com", &Headers::new())
            .await
            .unwrap();

        assert_eq!(client.get_requests().len(), 1);
        client.clear_requests();
        assert!(cloned.get_requests().is_empty());
    }
}
