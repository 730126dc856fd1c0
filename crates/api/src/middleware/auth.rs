//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sketchrelay_core::error::CoreError;
use sketchrelay_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication. Whatever went wrong (missing header, malformed token,
/// expired, bad signature), the response is the same uniform 401; the
/// specific cause only reaches the logs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from the `userId` claim).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Authorization header is not a Bearer token".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            AppError::Core(CoreError::Unauthorized(format!("Token rejected: {e}")))
        })?;

        Ok(AuthUser {
            user_id: claims.user_id,
        })
    }
}
