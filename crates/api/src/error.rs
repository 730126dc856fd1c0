use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sketchrelay_core::error::CoreError;

/// Application-level error type for HTTP handlers and the sync coordinator.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the exact JSON shapes deployed
/// clients expect: 400-class bodies carry `message`, 500-class bodies carry
/// `error`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `sketchrelay_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(core) => match core {
                // No-op outcomes are client errors, not server errors.
                CoreError::NothingToUndo => (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "Nothing to undo" }),
                ),
                CoreError::NothingToRedo => (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "Nothing to redo" }),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, json!({ "message": msg }))
                }
                // The cause is logged but never returned: every auth failure
                // looks identical on the wire.
                CoreError::Unauthorized(cause) => {
                    tracing::debug!(cause = %cause, "Request refused");
                    (StatusCode::UNAUTHORIZED, json!({ "message": "Unauthorized" }))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "Internal server error" }),
                    )
                }
            },

            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
        };

        (status, axum::Json(body)).into_response()
    }
}
