//! Error context for enriched error information.
//!
//! Context records which store operation failed and on which post, so a
//! log line or a banner can say more than the bare transport error.

use chrono::{DateTime, Utc};

use crate::models::PostId;

/// Context information attached to errors for debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Name of the operation that failed (e.g. "update_post").
    pub operation: String,

    /// Post the operation targeted, if any.
    pub post_id: Option<PostId>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,

    /// Optional component where the error originated.
    pub component: Option<String>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            post_id: None,
            timestamp: Utc::now(),
            component: None,
        }
    }

    /// Set the post ID for this context.
    pub fn with_post_id(mut self, post_id: &PostId) -> Self {
        self.post_id = Some(post_id.clone());
        self
    }

    /// Set the component for this context.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref post_id) = self.post_id {
            parts.push(format!("post_id={}", post_id));
        }

        if let Some(ref component) = self.component {
            parts.push(format!("component={}", component));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref post_id) = self.post_id {
            write!(f, " post={}", post_id)?;
        }

        Ok(())
    }
}
