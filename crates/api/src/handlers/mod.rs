pub mod dishes;
pub mod health;
pub mod upload;

use crate::error::AppError;

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
