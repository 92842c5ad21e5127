//! Notification entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub title: String,
    pub message: String,
    pub sender_id: DbId,
    pub recipient_role: String,
    pub department_id: Option<DbId>,
    pub is_read: bool,
    pub sent_at: Timestamp,
    pub expires_at: Option<Timestamp>,
}

/// Notification joined with the sender's full name, as the recipient
/// endpoints return it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationWithSender {
    pub id: DbId,
    pub title: String,
    pub message: String,
    pub recipient_role: String,
    pub department_id: Option<DbId>,
    pub is_read: bool,
    pub sent_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    /// Sender's full name.
    pub sender: String,
}

/// DTO for creating a new notification.
#[derive(Debug)]
pub struct CreateNotification {
    pub title: String,
    pub message: String,
    pub sender_id: DbId,
    pub recipient_role: String,
    pub department_id: Option<DbId>,
    pub expires_at: Option<Timestamp>,
}
