//! Handlers for the admin-only `/admin/departments` resource.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use campus_core::error::CoreError;
use campus_core::roles::Role;
use campus_core::types::DbId;

use campus_db::models::department::{CreateDepartment, DepartmentWithHod, UpdateDepartment};
use campus_db::repositories::DepartmentRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::handlers::ensure_role;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/admin/departments/
pub async fn list_departments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<DepartmentWithHod>>> {
    let departments = DepartmentRepo::list_with_hod(&state.pool).await?;
    Ok(Json(departments))
}

/// POST /api/v1/admin/departments/
///
/// The HOD reference, when given, must point at a user holding the
/// `hod` role.
pub async fn create_department(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    headers: HeaderMap,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<DepartmentWithHod>)> {
    if let Some(hod_id) = input.hod_id {
        ensure_role(&state.pool, hod_id, Role::Hod, "hod_id").await?;
    }

    let created = DepartmentRepo::create(&state.pool, &input).await?;

    audit::record(
        &state.pool,
        admin.user_id,
        "create",
        "department",
        created.id,
        audit::client_ip(&headers),
        format!("Created department '{}'", created.name),
    )
    .await;

    let department = DepartmentRepo::find_with_hod(&state.pool, created.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "department",
            id: created.id,
        }))?;

    Ok((StatusCode::CREATED, Json(department)))
}

/// GET /api/v1/admin/departments/{id}/
pub async fn get_department(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DepartmentWithHod>> {
    let department = DepartmentRepo::find_with_hod(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "department",
            id,
        }))?;

    Ok(Json(department))
}

/// PUT /api/v1/admin/departments/{id}/
pub async fn update_department(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    headers: HeaderMap,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<DepartmentWithHod>> {
    if let Some(hod_id) = input.hod_id {
        ensure_role(&state.pool, hod_id, Role::Hod, "hod_id").await?;
    }

    let updated = DepartmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "department",
            id,
        }))?;

    audit::record(
        &state.pool,
        admin.user_id,
        "update",
        "department",
        id,
        audit::client_ip(&headers),
        format!("Updated department '{}'", updated.name),
    )
    .await;

    let department = DepartmentRepo::find_with_hod(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "department",
            id,
        }))?;

    Ok(Json(department))
}

/// DELETE /api/v1/admin/departments/{id}/
///
/// Users of the department are detached, never deleted; its semesters
/// cascade away.
pub async fn delete_department(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    headers: HeaderMap,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DepartmentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "department",
            id,
        }));
    }

    audit::record(
        &state.pool,
        admin.user_id,
        "delete",
        "department",
        id,
        audit::client_ip(&headers),
        format!("Deleted department {id}"),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
