//! Input validation errors.
//!
//! These are raised before any request is sent: a rejected draft never
//! reaches the network or the store.

use std::fmt;

use crate::models::PostId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty or whitespace.
    EmptyTitle,

    /// Body is empty or whitespace.
    EmptyBody,

    /// No author was selected.
    MissingAuthor,

    /// The post is not in the table.
    UnknownPost { id: PostId },

    /// Reaction name outside the known set.
    UnknownReaction { name: String },

    /// A configuration value could not be parsed.
    InvalidSetting { key: String, value: String },
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::EmptyTitle => "Please enter a title.".to_string(),
            ValidationError::EmptyBody => "Please enter some content.".to_string(),
            ValidationError::MissingAuthor => "Please pick an author.".to_string(),
            ValidationError::UnknownPost { .. } => "Post not found!".to_string(),
            ValidationError::UnknownReaction { name } => {
                format!("'{}' is not a known reaction.", name)
            }
            ValidationError::InvalidSetting { key, value } => {
                format!("Invalid value '{}' for {}.", value, key)
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::EmptyTitle => "E_VAL_TITLE",
            ValidationError::EmptyBody => "E_VAL_BODY",
            ValidationError::MissingAuthor => "E_VAL_AUTHOR",
            ValidationError::UnknownPost { .. } => "E_VAL_POST",
            ValidationError::UnknownReaction { .. } => "E_VAL_REACTION",
            ValidationError::InvalidSetting { .. } => "E_CFG_INVALID",
        }
    }

    /// Configuration problems are reported separately from form input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ValidationError::InvalidSetting { .. })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "title must not be empty"),
            ValidationError::EmptyBody => write!(f, "body must not be empty"),
            ValidationError::MissingAuthor => write!(f, "no author selected"),
            ValidationError::UnknownPost { id } => write!(f, "unknown post '{}'", id),
            ValidationError::UnknownReaction { name } => {
                write!(f, "unknown reaction '{}'", name)
            }
            ValidationError::InvalidSetting { key, value } => {
                write!(f, "invalid value '{}' for {}", value, key)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
