//! Handlers for the admin-only `/admin/semesters` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_core::validation::{validate_academic_year, validate_semester_number};

use campus_db::models::semester::{CreateSemester, Semester, UpdateSemester};
use campus_db::repositories::SemesterRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/admin/semesters/
pub async fn list_semesters(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Semester>>> {
    let semesters = SemesterRepo::list(&state.pool).await?;
    Ok(Json(semesters))
}

/// POST /api/v1/admin/semesters/
///
/// Validates the semester number (1-8) and academic year (`YYYY-YY`).
/// A missing department surfaces as 400 from the foreign key.
pub async fn create_semester(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateSemester>,
) -> AppResult<(StatusCode, Json<Semester>)> {
    validate_semester_number(input.number).map_err(AppError::Core)?;
    validate_academic_year(&input.academic_year).map_err(AppError::Core)?;

    let created = SemesterRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/admin/semesters/{id}/
pub async fn get_semester(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Semester>> {
    let semester = SemesterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "semester",
            id,
        }))?;

    Ok(Json(semester))
}

/// PUT /api/v1/admin/semesters/{id}/
pub async fn update_semester(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSemester>,
) -> AppResult<Json<Semester>> {
    if let Some(number) = input.number {
        validate_semester_number(number).map_err(AppError::Core)?;
    }
    if let Some(ref academic_year) = input.academic_year {
        validate_academic_year(academic_year).map_err(AppError::Core)?;
    }

    let updated = SemesterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "semester",
            id,
        }))?;

    Ok(Json(updated))
}

/// DELETE /api/v1/admin/semesters/{id}/
///
/// Sections and subjects under the semester cascade away; enrolled
/// users are detached.
pub async fn delete_semester(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SemesterRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "semester",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
