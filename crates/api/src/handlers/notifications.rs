//! Handlers for the admin-only `/admin/notifications` resource.
//!
//! Recipients read their notifications through the role-scoped
//! endpoints (`/student/notifications/`); this module is the sending
//! and housekeeping side.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use campus_core::error::CoreError;
use campus_core::roles::validate_recipient_role;
use campus_core::types::{DbId, Timestamp};
use serde::Deserialize;

use campus_db::models::notification::{CreateNotification, Notification, NotificationWithSender};
use campus_db::repositories::NotificationRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /admin/notifications/`.
///
/// The sender is always the acting admin, never taken from the payload.
#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    pub title: String,
    pub message: String,
    pub recipient_role: String,
    #[serde(default)]
    pub department_id: Option<DbId>,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

/// GET /api/v1/admin/notifications/
///
/// Every notification regardless of audience, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<NotificationWithSender>>> {
    let notifications = NotificationRepo::list_all(&state.pool).await?;
    Ok(Json(notifications))
}

/// POST /api/v1/admin/notifications/
///
/// The audience must be one of the closed recipient-role set.
pub async fn create_notification(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    headers: HeaderMap,
    Json(input): Json<CreateNotificationRequest>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    validate_recipient_role(&input.recipient_role).map_err(AppError::Core)?;

    let created = NotificationRepo::create(
        &state.pool,
        &CreateNotification {
            title: input.title,
            message: input.message,
            sender_id: admin.user_id,
            recipient_role: input.recipient_role,
            department_id: input.department_id,
            expires_at: input.expires_at,
        },
    )
    .await?;

    audit::record(
        &state.pool,
        admin.user_id,
        "create",
        "notification",
        created.id,
        audit::client_ip(&headers),
        format!(
            "Sent notification '{}' to '{}'",
            created.title, created.recipient_role
        ),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/admin/notifications/{id}/
pub async fn get_notification(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Notification>> {
    let notification = NotificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "notification",
            id,
        }))?;

    Ok(Json(notification))
}

/// DELETE /api/v1/admin/notifications/{id}/
pub async fn delete_notification(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    headers: HeaderMap,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = NotificationRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "notification",
            id,
        }));
    }

    audit::record(
        &state.pool,
        admin.user_id,
        "delete",
        "notification",
        id,
        audit::client_ip(&headers),
        format!("Deleted notification {id}"),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
