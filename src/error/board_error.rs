//! Unified error type for postboard.
//!
//! `BoardError` folds the network and validation errors into one enum so
//! session operations can return a single result type.

use std::fmt;

use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::validation::ValidationError;
use crate::traits::HttpError;

#[derive(Debug)]
pub enum BoardError {
    /// Transport failures and bad responses.
    Network(NetworkError),

    /// Input rejected before any request was sent.
    Validation(ValidationError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<BoardError>,
        context: ErrorContext,
    },
}

impl BoardError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            BoardError::Network(err) => match err {
                NetworkError::HttpStatus { status, .. } if *status >= 500 => {
                    ErrorCategory::Server
                }
                NetworkError::HttpStatus { .. } | NetworkError::InvalidResponse { .. } => {
                    ErrorCategory::Client
                }
                _ => ErrorCategory::Network,
            },
            BoardError::Validation(err) => {
                if err.is_configuration() {
                    ErrorCategory::Configuration
                } else {
                    ErrorCategory::User
                }
            }
            BoardError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            BoardError::Network(err) => err.is_retryable(),
            BoardError::Validation(_) => false,
            BoardError::WithContext { error, .. } => error.is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            BoardError::Network(err) => err.user_message(),
            BoardError::Validation(err) => err.user_message(),
            BoardError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            BoardError::Network(err) => err.error_code(),
            BoardError::Validation(err) => err.error_code(),
            BoardError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        BoardError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            BoardError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &BoardError {
        match self {
            BoardError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Network(err) => write!(f, "{}", err),
            BoardError::Validation(err) => write!(f, "{}", err),
            BoardError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BoardError::Network(err) => Some(err),
            BoardError::Validation(err) => Some(err),
            BoardError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<NetworkError> for BoardError {
    fn from(err: NetworkError) -> Self {
        BoardError::Network(err)
    }
}

impl From<ValidationError> for BoardError {
    fn from(err: ValidationError) -> Self {
        BoardError::Validation(err)
    }
}

impl From<HttpError> for BoardError {
    fn from(err: HttpError) -> Self {
        BoardError::Network(NetworkError::from_http(err, "unknown"))
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Network(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostId;
    use std::error::Error;

    #[test]
    fn test_network_error_category() {
        let err = BoardError::Network(NetworkError::ConnectionFailed {
            url: "https://example.com".to_string(),
            message: "refused".to_string(),
        });
        assert_eq!(err.category(), ErrorCategory::Network);

        let server = BoardError::Network(NetworkError::HttpStatus {
            status: 502,
            message: "bad gateway".to_string(),
        });
        assert_eq!(server.category(), ErrorCategory::Server);

        let missing = BoardError::Network(NetworkError::HttpStatus {
            status: 404,
            message: "not found".to_string(),
        });
        assert_eq!(missing.category(), ErrorCategory::Client);
    }

    #[test]
    fn test_validation_error_category() {
        let err: BoardError = ValidationError::EmptyTitle.into();
        assert_eq!(err.category(), ErrorCategory::User);
        assert!(!err.is_retryable());

        let cfg: BoardError = ValidationError::InvalidSetting {
            key: "K".to_string(),
            value: "V".to_string(),
        }
        .into();
        assert_eq!(cfg.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_context_is_transparent() {
        let err: BoardError = NetworkError::Timeout {
            url: "https://example.com/posts".to_string(),
        }
        .into();
        let with_ctx =
            err.with_context(ErrorContext::new("fetch_posts").with_post_id(&PostId::from(1)));

        assert_eq!(with_ctx.category(), ErrorCategory::Network);
        assert!(with_ctx.is_retryable());
        assert_eq!(with_ctx.error_code(), "E_NET_TIMEOUT");
        assert_eq!(with_ctx.context().unwrap().operation, "fetch_posts");
        assert!(matches!(with_ctx.inner(), BoardError::Network(_)));
        assert!(with_ctx.to_string().ends_with("([fetch_posts] post=1)"));
    }

    #[test]
    fn test_source_chain() {
        let err: BoardError = ValidationError::MissingAuthor.into();
        assert!(err.source().is_some());
    }

    #[test]
    fn test_http_error_conversion() {
        let err: BoardError = HttpError::Cancelled.into();
        assert!(matches!(err, BoardError::Network(NetworkError::Cancelled)));
    }
}
