//! Result type alias for postboard operations.

use super::board_error::BoardError;
use super::context::ErrorContext;

/// Type alias for Results using BoardError.
pub type BoardResult<T> = Result<T, BoardError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use postboard::error::{ErrorContext, ResultExt};
    ///
    /// let result = api.delete_post(&id)
    ///     .await
    ///     .context(ErrorContext::new("delete_post").with_post_id(&id));
    /// ```
    fn context(self, ctx: ErrorContext) -> BoardResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> BoardResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoardError>,
{
    fn context(self, ctx: ErrorContext) -> BoardResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> BoardResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
