//! Handler result alias

use crate::AppError;

/// Result of handlers, request conversions and input checks
///
/// Repository errors convert into it through `From<RepoError>`.
pub type AppResult<T> = Result<T, AppError>;
