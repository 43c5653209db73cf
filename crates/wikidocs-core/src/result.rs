//! Application result alias.

use crate::error::AppError;

/// Result type used across all WikiDocs crates.
pub type AppResult<T> = Result<T, AppError>;
