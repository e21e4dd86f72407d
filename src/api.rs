//! Client for the remote post and user services.
//!
//! Wraps an [`HttpClient`] with the five REST calls the blog needs and
//! turns transport failures and non-2xx statuses into [`NetworkError`]s.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::NetworkError;
use crate::models::{NewPost, Post, PostId, RemotePost, User};
use crate::traits::{Headers, HttpClient, Response};

/// Client for interacting with the blog's REST backend.
pub struct BlogApiClient<C> {
    /// Base URL without trailing slash
    base_url: String,
    http: C,
}

impl<C: HttpClient> BlogApiClient<C> {
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    fn post_url(&self, id: &PostId) -> String {
        format!("{}/posts/{}", self.base_url, urlencoding::encode(&id.to_string()))
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn json_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    fn accept_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    /// Fail on any non-2xx status, carrying the response text as the message.
    fn check_status(response: Response) -> Result<Response, NetworkError> {
        if response.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .ok()
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "Unknown error".to_string());
        Err(NetworkError::HttpStatus {
            status: response.status,
            message,
        })
    }

    fn decode<T: DeserializeOwned>(response: &Response, url: &str) -> Result<T, NetworkError> {
        response.json().map_err(|e| NetworkError::InvalidResponse {
            message: format!("{} from {}", e, url),
        })
    }

    fn encode<T: Serialize>(value: &T) -> Result<String, NetworkError> {
        serde_json::to_string(value).map_err(NetworkError::from)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, NetworkError> {
        let response = self
            .http
            .get(url, &Self::accept_headers())
            .await
            .map_err(|e| NetworkError::from_http(e, url))?;
        let response = Self::check_status(response)?;
        Self::decode(&response, url)
    }

    /// Fetch every post.
    ///
    /// GET /posts
    pub async fn fetch_posts(&self) -> Result<Vec<RemotePost>, NetworkError> {
        let url = self.posts_url();
        let posts: Vec<RemotePost> = self.get_json(&url).await?;
        debug!(count = posts.len(), "fetched posts");
        Ok(posts)
    }

    /// Create a post; returns the server's echo.
    ///
    /// POST /posts
    pub async fn create_post(&self, post: &NewPost) -> Result<RemotePost, NetworkError> {
        let url = self.posts_url();
        let body = Self::encode(post)?;

        let response = self
            .http
            .post(&url, &body, &Self::json_headers())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        let response = Self::check_status(response)?;
        Self::decode(&response, &url)
    }

    /// Replace a post; returns the server's echo.
    ///
    /// PUT /posts/{id}
    pub async fn update_post(&self, post: &Post) -> Result<RemotePost, NetworkError> {
        let url = self.post_url(&post.id);
        let body = Self::encode(post)?;

        let response = self
            .http
            .put(&url, &body, &Self::json_headers())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        let response = Self::check_status(response)?;
        Self::decode(&response, &url)
    }

    /// Delete a post. Any 2xx status confirms the delete; the body is ignored.
    ///
    /// DELETE /posts/{id}
    pub async fn delete_post(&self, id: &PostId) -> Result<(), NetworkError> {
        let url = self.post_url(id);

        let response = self
            .http
            .delete(&url, &Self::accept_headers())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        Self::check_status(response)?;
        Ok(())
    }

    /// Fetch every user.
    ///
    /// GET /users
    pub async fn fetch_users(&self) -> Result<Vec<User>, NetworkError> {
        let url = self.users_url();
        let users: Vec<User> = self.get_json(&url).await?;
        debug!(count = users.len(), "fetched users");
        Ok(users)
    }
}
