//! Handlers for the caller's own `/profile` resource.

use axum::extract::State;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::validation::validate_email;
use serde::Deserialize;

use campus_db::models::user::{UpdateUser, UserResponse};
use campus_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Request body for `PUT /profile/`.
///
/// Deliberately excludes role, activation, and org placement; those are
/// admin-only and go through `/users/{id}/`.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// GET /api/v1/profile/
///
/// The caller's own user record, with department/semester/section names
/// resolved.
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<UserResponse>> {
    let ctx = UserRepo::find_with_context(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: user.user_id,
        }))?;

    Ok(Json(ctx.into()))
}

/// PUT /api/v1/profile/
///
/// Partial update of the caller's own identity fields. Only supplied
/// fields change.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    if let Some(ref email) = input.email {
        validate_email(email).map_err(AppError::Core)?;
    }

    let changes = UpdateUser {
        username: input.username,
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        ..Default::default()
    };

    UserRepo::update(&state.pool, user.user_id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: user.user_id,
        }))?;

    let ctx = UserRepo::find_with_context(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: user.user_id,
        }))?;

    Ok(Json(ctx.into()))
}
