//! Handlers for the admin-only `/admin/sections` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::roles::Role;
use campus_core::types::DbId;

use campus_db::models::section::{CreateSection, Section, UpdateSection};
use campus_db::repositories::SectionRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_role;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/admin/sections/
pub async fn list_sections(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Section>>> {
    let sections = SectionRepo::list(&state.pool).await?;
    Ok(Json(sections))
}

/// POST /api/v1/admin/sections/
///
/// The in-charge reference, when given, must point at a faculty member.
pub async fn create_section(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateSection>,
) -> AppResult<(StatusCode, Json<Section>)> {
    if let Some(faculty_id) = input.faculty_incharge_id {
        ensure_role(&state.pool, faculty_id, Role::Faculty, "faculty_incharge_id").await?;
    }

    let created = SectionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/admin/sections/{id}/
pub async fn get_section(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Section>> {
    let section = SectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "section",
            id,
        }))?;

    Ok(Json(section))
}

/// PUT /api/v1/admin/sections/{id}/
pub async fn update_section(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSection>,
) -> AppResult<Json<Section>> {
    if let Some(faculty_id) = input.faculty_incharge_id {
        ensure_role(&state.pool, faculty_id, Role::Faculty, "faculty_incharge_id").await?;
    }

    let updated = SectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "section",
            id,
        }))?;

    Ok(Json(updated))
}

/// DELETE /api/v1/admin/sections/{id}/
pub async fn delete_section(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SectionRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "section",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
