use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cookorder_core::dish::FieldError;
use cookorder_core::error::CoreError;
use cookorder_storage::StorageError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cookorder_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An object storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// One or more form fields failed validation.
    #[error("Invalid input: {} field error(s)", .0.len())]
    InvalidFields(Vec<FieldError>),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The path exists but does not accept the request method.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Upstream errors ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal()
            }
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Storage error");
                internal()
            }

            // --- HTTP-specific errors ---
            AppError::InvalidFields(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Invalid input".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method not allowed".to_string(),
            ),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let AppError::InvalidFields(errors) = &self {
            body["errors"] = json!(errors);
        }

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
