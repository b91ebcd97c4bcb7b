//! Convenience result type alias for Notez.

use crate::error::AppError;

/// A specialized `Result` type for Notez operations.
pub type AppResult<T> = Result<T, AppError>;
