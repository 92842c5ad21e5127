//! Bearer-token extractor that turns `Authorization` headers into an
//! authenticated caller.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use campus_core::error::CoreError;
use campus_core::roles::Role;
use campus_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, extracted from a Bearer token in the
/// `Authorization` header.
///
/// Take it as a handler parameter wherever a route requires a valid
/// access token:
///
/// ```ignore
/// async fn whoami(user: AuthUser) -> AppResult<Json<DbId>> {
///     Ok(Json(user.user_id))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// Database id carried in the token's `sub` claim.
    pub user_id: DbId,
    /// Role parsed from the token's role claim.
    pub role: Role,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Pull the raw token out of `Authorization: Bearer <token>`.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        // A token carrying an unknown role string is as invalid as a bad
        // signature.
        let role: Role = claims
            .role
            .parse()
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role,
        })
    }
}
