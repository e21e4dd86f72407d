//! Unified error handling for postboard.
//!
//! This module provides:
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Network and Validation errors
//! - **Unified Error Type**: `BoardError` consolidates both
//! - **Error Context**: Operation and post id attached to errors
//! - **Result Type Alias**: `BoardResult<T>` for consistent return types
//!
//! # Error Categories
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Server | Backend errors (5xx) | Yes |
//! | Client | Rejected request, bad response | No |
//! | User | Invalid form input | No |
//! | Configuration | Bad environment values | No |

mod board_error;
mod category;
mod context;
mod network;
mod result;
mod validation;

pub use board_error::BoardError;
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use network::NetworkError;
pub use result::{BoardResult, ResultExt};
pub use validation::ValidationError;
