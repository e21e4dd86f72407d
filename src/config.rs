//! Session configuration.
//!
//! Built with `with_*` setters or read from `POSTBOARD_*` environment
//! variables.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{BoardResult, ValidationError};

/// Default base URL of the post and user services.
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

pub const ENV_API_URL: &str = "POSTBOARD_API_URL";
pub const ENV_UPDATE_FALLBACK: &str = "POSTBOARD_UPDATE_FALLBACK";
pub const ENV_TIMEOUT_SECS: &str = "POSTBOARD_TIMEOUT_SECS";

/// What to do when the remote update call itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateFallback {
    /// Return the error and leave the table alone.
    #[default]
    Strict,
    /// Apply the caller's input as if the server had echoed it back.
    /// Useful against mock backends that reject updates to posts they
    /// never stored.
    EchoInput,
}

impl UpdateFallback {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateFallback::Strict => "strict",
            UpdateFallback::EchoInput => "echo",
        }
    }
}

impl fmt::Display for UpdateFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateFallback {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(UpdateFallback::Strict),
            "echo" | "echo-input" => Ok(UpdateFallback::EchoInput),
            _ => Err(ValidationError::InvalidSetting {
                key: ENV_UPDATE_FALLBACK.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for a [`Session`](crate::session::Session).
///
/// # Example
///
/// ```ignore
/// use postboard::config::{BoardConfig, UpdateFallback};
///
/// let config = BoardConfig::default()
///     .with_api_url("http://localhost:3000")
///     .with_update_fallback(UpdateFallback::EchoInput);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Base URL serving `/posts` and `/users`
    pub api_url: String,
    /// Policy for failed remote updates
    pub update_fallback: UpdateFallback,
    /// Per-request timeout (default: none)
    pub request_timeout: Option<Duration>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            update_fallback: UpdateFallback::default(),
            request_timeout: None,
        }
    }
}

impl BoardConfig {
    /// Create a new BoardConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the remote services.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the failed-update policy.
    pub fn with_update_fallback(mut self, fallback: UpdateFallback) -> Self {
        self.update_fallback = fallback;
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Read overrides from the environment. Unset variables keep defaults;
    /// unparsable ones are an error.
    pub fn from_env() -> BoardResult<Self> {
        let mut config = Self::default();

        if let Some(url) = read_env(ENV_API_URL) {
            config = config.with_api_url(url);
        }

        if let Some(raw) = read_env(ENV_UPDATE_FALLBACK) {
            config = config.with_update_fallback(raw.parse()?);
        }

        if let Some(raw) = read_env(ENV_TIMEOUT_SECS) {
            let invalid = || ValidationError::InvalidSetting {
                key: ENV_TIMEOUT_SECS.to_string(),
                value: raw.clone(),
            };
            // Zero would time out every request
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(invalid)?;
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
