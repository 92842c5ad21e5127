//! Handlers for the admin-only `/admin/subjects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_core::validation::validate_credits;

use campus_db::models::subject::{CreateSubject, SubjectWithFaculty, UpdateSubject};
use campus_db::repositories::SubjectRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_role;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/admin/subjects/
pub async fn list_subjects(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<SubjectWithFaculty>>> {
    let subjects = SubjectRepo::list_with_faculty(&state.pool).await?;
    Ok(Json(subjects))
}

/// POST /api/v1/admin/subjects/
///
/// Credits must be positive; the faculty assignment, when given, must
/// reference a faculty member. Duplicate subject codes surface as 409.
pub async fn create_subject(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<SubjectWithFaculty>)> {
    validate_credits(input.credits).map_err(AppError::Core)?;
    if let Some(faculty_id) = input.faculty_assigned_id {
        ensure_role(&state.pool, faculty_id, Role::Faculty, "faculty_assigned_id").await?;
    }

    let created = SubjectRepo::create(&state.pool, &input).await?;

    let subject = SubjectRepo::find_with_faculty(&state.pool, created.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "subject",
            id: created.id,
        }))?;

    Ok((StatusCode::CREATED, Json(subject)))
}

/// GET /api/v1/admin/subjects/{id}/
pub async fn get_subject(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<SubjectWithFaculty>> {
    let subject = SubjectRepo::find_with_faculty(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "subject",
            id,
        }))?;

    Ok(Json(subject))
}

/// PUT /api/v1/admin/subjects/{id}/
pub async fn update_subject(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubject>,
) -> AppResult<Json<SubjectWithFaculty>> {
    if let Some(credits) = input.credits {
        validate_credits(credits).map_err(AppError::Core)?;
    }
    if let Some(faculty_id) = input.faculty_assigned_id {
        ensure_role(&state.pool, faculty_id, Role::Faculty, "faculty_assigned_id").await?;
    }

    SubjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "subject",
            id,
        }))?;

    let subject = SubjectRepo::find_with_faculty(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "subject",
            id,
        }))?;

    Ok(Json(subject))
}

/// DELETE /api/v1/admin/subjects/{id}/
///
/// Attendance recorded against the subject cascades away.
pub async fn delete_subject(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SubjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "subject",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
