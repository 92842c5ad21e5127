//! Handlers for the admin-only `/admin/audit-logs` resource.

use axum::extract::{Query, State};
use axum::Json;

use campus_db::models::audit::{AuditLogPage, AuditQuery};
use campus_db::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/admin/audit-logs/?user_id=&action=&resource_type=&limit=&offset=
///
/// Query the audit trail with filters and pagination, newest first.
/// The page carries the total match count so clients can paginate.
pub async fn list_audit_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AuditQuery>,
) -> AppResult<Json<AuditLogPage>> {
    let items = AuditLogRepo::query(&state.pool, &params).await?;
    let total = AuditLogRepo::count(&state.pool, &params).await?;

    Ok(Json(AuditLogPage { items, total }))
}
