//! Handlers for the admin-only `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use campus_core::error::CoreError;
use campus_core::policy::{can_modify_user, UserRef};
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_core::validation::{validate_email, validate_password};
use serde::{Deserialize, Serialize};

use campus_db::models::user::{CreateUser, UpdateUser, UserListFilter, UserResponse};
use campus_db::repositories::{SectionRepo, SessionRepo, UserRepo};

use crate::audit;
use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/`.
///
/// The role arrives as a string and is parsed so an unknown value is a
/// 400, not a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: String,
    #[serde(default)]
    pub department_id: Option<DbId>,
    #[serde(default)]
    pub semester_id: Option<DbId>,
    #[serde(default)]
    pub section_id: Option<DbId>,
}

/// Request body for `PUT /users/{id}/`. Only supplied fields change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub department_id: Option<DbId>,
    pub semester_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /users/{id}/reset-password/`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// Generic message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users/?role=&department_id=&section_id=
///
/// List users, optionally filtered, newest accounts first.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(filter): Query<UserListFilter>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list_with_context(&state.pool, &filter).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/v1/users/
///
/// Create a user with an admin-chosen role and org placement. Duplicate
/// username/email surfaces as 409 from the unique indexes.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    headers: HeaderMap,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_email(&input.email).map_err(AppError::Core)?;
    validate_password(&input.password).map_err(AppError::Core)?;
    let role: Role = input.role.parse().map_err(AppError::Core)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let created = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            role,
            department_id: input.department_id,
            semester_id: input.semester_id,
            section_id: input.section_id,
        },
    )
    .await?;

    if let Some(section_id) = created.section_id {
        SectionRepo::refresh_student_count(&state.pool, section_id).await?;
    }

    audit::record(
        &state.pool,
        admin.user_id,
        "create",
        "user",
        created.id,
        audit::client_ip(&headers),
        format!("Created {} account '{}'", created.role, created.username),
    )
    .await;

    let ctx = UserRepo::find_with_context(&state.pool, created.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: created.id,
        }))?;

    Ok((StatusCode::CREATED, Json(ctx.into())))
}

/// GET /api/v1/users/{id}/
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let ctx = UserRepo::find_with_context(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;

    Ok(Json(ctx.into()))
}

/// PUT /api/v1/users/{id}/
///
/// Partial update. Reassigning the section keeps the denormalized
/// student counts current; deactivating revokes the user's sessions.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    headers: HeaderMap,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;

    let actor = UserRef::new(admin.user_id, admin.role, None);
    let target_ref = UserRef::new(target.id, target.role, target.department_id);
    if !can_modify_user(actor, target_ref) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot modify this user".into(),
        )));
    }

    if let Some(ref email) = input.email {
        validate_email(email).map_err(AppError::Core)?;
    }
    let role = match input.role {
        Some(ref r) => Some(r.parse::<Role>().map_err(AppError::Core)?),
        None => None,
    };

    let changes = UpdateUser {
        username: input.username,
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        role,
        department_id: input.department_id,
        semester_id: input.semester_id,
        section_id: input.section_id,
        is_active: input.is_active,
    };

    let updated = UserRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;

    // Keep student counts in sync for both the old and new section.
    for section_id in [target.section_id, updated.section_id].into_iter().flatten() {
        SectionRepo::refresh_student_count(&state.pool, section_id).await?;
    }

    if input.is_active == Some(false) {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::debug!(user_id = id, revoked, "Revoked sessions of deactivated user");
    }

    audit::record(
        &state.pool,
        admin.user_id,
        "update",
        "user",
        id,
        audit::client_ip(&headers),
        format!("Updated user '{}'", updated.username),
    )
    .await;

    let ctx = UserRepo::find_with_context(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;

    Ok(Json(ctx.into()))
}

/// DELETE /api/v1/users/{id}/
///
/// Hard delete. The user's attendance cascades away; org references
/// elsewhere (department HOD, subject faculty) are nulled by the FKs.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    headers: HeaderMap,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;

    let actor = UserRef::new(admin.user_id, admin.role, None);
    let target_ref = UserRef::new(target.id, target.role, target.department_id);
    if !can_modify_user(actor, target_ref) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot modify this user".into(),
        )));
    }

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "user", id }));
    }

    if let Some(section_id) = target.section_id {
        SectionRepo::refresh_student_count(&state.pool, section_id).await?;
    }

    audit::record(
        &state.pool,
        admin.user_id,
        "delete",
        "user",
        id,
        audit::client_ip(&headers),
        format!("Deleted user '{}'", target.username),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/{id}/reset-password/
///
/// Set a fresh password for the target user and revoke their sessions so
/// stale refresh tokens stop working.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    headers: HeaderMap,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_password(&input.new_password).map_err(AppError::Core)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "user", id }));
    }

    let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    tracing::debug!(user_id = id, revoked, "Revoked sessions after password reset");

    audit::record(
        &state.pool,
        admin.user_id,
        "reset_password",
        "user",
        id,
        audit::client_ip(&headers),
        format!("Reset password for user {id}"),
    )
    .await;

    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}
