//! Error category classification for unified error handling.
//!
//! This module provides a high-level categorization of errors to enable
//! consistent handling and user messaging.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection, timeout).
    /// Generally transient and retryable.
    Network,

    /// Backend errors (HTTP 5xx).
    /// Generally transient and retryable after delay.
    Server,

    /// Client-side errors (rejected request, malformed response).
    /// Not retryable.
    Client,

    /// User action required (empty title, no author picked).
    /// Not retryable until user takes corrective action.
    User,

    /// Configuration errors (bad environment values).
    /// Not retryable until configuration is corrected.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Server => {
                "The server may be experiencing issues. Please try again later"
            }
            ErrorCategory::Client => "The request was not accepted. Reload the posts and retry",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::Configuration => "Check the POSTBOARD_* environment variables",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::User.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Network.to_string(), "network");
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    }

    #[test]
    fn test_category_hints_not_empty() {
        for category in [
            ErrorCategory::Network,
            ErrorCategory::Server,
            ErrorCategory::Client,
            ErrorCategory::User,
            ErrorCategory::Configuration,
        ] {
            assert!(!category.recovery_hint().is_empty());
        }
    }
}
