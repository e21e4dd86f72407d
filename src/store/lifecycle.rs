//! Request lifecycle phases and the fetch status they drive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One phase of an asynchronous store operation.
///
/// Every remote operation is applied to a store as a `Pending` transition
/// followed by exactly one `Fulfilled` or `Rejected` transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle<T> {
    Pending,
    Fulfilled(T),
    /// Failure description, as shown to the user
    Rejected(String),
}

impl<T> Lifecycle<T> {
    /// Turn a finished call into its terminal phase.
    pub fn settle<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Lifecycle::Fulfilled(value),
            Err(err) => Lifecycle::Rejected(err.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Lifecycle::Pending)
    }

    pub fn phase(&self) -> &'static str {
        match self {
            Lifecycle::Pending => "pending",
            Lifecycle::Fulfilled(_) => "fulfilled",
            Lifecycle::Rejected(_) => "rejected",
        }
    }
}

/// Status of the bulk post fetch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Loading => "loading",
            RequestStatus::Succeeded => "succeeded",
            RequestStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
