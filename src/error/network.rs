//! Network-related error types.
//!
//! This module defines errors that occur while talking to the remote post
//! and user services.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { url: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// Response body could not be decoded.
    InvalidResponse { message: String },

    /// Request was cancelled.
    Cancelled,

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Map a transport error for `url` into a NetworkError.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(_) => NetworkError::Timeout {
                url: url.to_string(),
            },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            HttpError::Cancelled => NetworkError::Cancelled,
            HttpError::InvalidUrl(message) => NetworkError::Other {
                message: format!("invalid URL '{}': {}", url, message),
            },
            HttpError::Io(message) | HttpError::Other(message) => NetworkError::Other { message },
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Cancelled => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to connect to the server. Please check your internet connection."
                    .to_string()
            }
            NetworkError::Timeout { .. } => {
                "The server took too long to answer. Please try again.".to_string()
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                400 => "The request was invalid. Please try again.".to_string(),
                404 => "The requested post was not found.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!(
                    "The server returned an error (HTTP {}). Please try again.",
                    status
                ),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { url } => write!(f, "Request to '{}' timed out", url),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::InvalidResponse {
            message: err.to_string(),
        }
    }
}
