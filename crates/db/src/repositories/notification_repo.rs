//! Repository for the `notifications` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{CreateNotification, Notification, NotificationWithSender};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, message, sender_id, recipient_role, department_id, \
                        is_read, sent_at, expires_at";

/// Column list resolving the sender's full name.
const SENDER_COLUMNS: &str = "\
    n.id, n.title, n.message, n.recipient_role, n.department_id, \
    n.is_read, n.sent_at, n.expires_at, \
    TRIM(CONCAT(u.first_name, ' ', u.last_name)) AS sender";

/// Provides CRUD and visibility queries for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a new notification, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (title, message, sender_id, recipient_role, \
                                        department_id, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(&input.title)
            .bind(&input.message)
            .bind(input.sender_id)
            .bind(&input.recipient_role)
            .bind(input.department_id)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a notification by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every notification with sender names, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<NotificationWithSender>, sqlx::Error> {
        let query = format!(
            "SELECT {SENDER_COLUMNS} FROM notifications n \
             JOIN users u ON u.id = n.sender_id \
             ORDER BY n.sent_at DESC"
        );
        sqlx::query_as::<_, NotificationWithSender>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the unexpired notifications visible to a user, newest first.
    ///
    /// Visible means: addressed to the user's role or to `all`, and
    /// either campus-wide (no department) or scoped to the user's
    /// department. Users without a department see only campus-wide
    /// notifications.
    pub async fn list_visible(
        pool: &PgPool,
        role: &str,
        department_id: Option<DbId>,
    ) -> Result<Vec<NotificationWithSender>, sqlx::Error> {
        let query = format!(
            "SELECT {SENDER_COLUMNS} FROM notifications n \
             JOIN users u ON u.id = n.sender_id \
             WHERE (n.recipient_role = $1 OR n.recipient_role = 'all') \
               AND (n.department_id IS NULL OR n.department_id = $2) \
               AND (n.expires_at IS NULL OR n.expires_at > NOW()) \
             ORDER BY n.sent_at DESC"
        );
        sqlx::query_as::<_, NotificationWithSender>(&query)
            .bind(role)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a notification as read if it is visible to the given
    /// role/department.
    ///
    /// Returns `true` when a visible row matched; marking an
    /// already-read notification still counts as a match.
    pub async fn mark_read_if_visible(
        pool: &PgPool,
        id: DbId,
        role: &str,
        department_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true \
             WHERE id = $1 \
               AND (recipient_role = $2 OR recipient_role = 'all') \
               AND (department_id IS NULL OR department_id = $3) \
               AND (expires_at IS NULL OR expires_at > NOW())",
        )
        .bind(id)
        .bind(role)
        .bind(department_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a notification. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
