//! Audit log entity model and DTOs.
//!
//! Audit rows are append-only; there is no update DTO.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single audit log entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub user_id: DbId,
    pub action: String,
    pub resource_type: String,
    pub resource_id: DbId,
    pub timestamp: Timestamp,
    pub ip_address: Option<String>,
    pub details: String,
}

/// Audit log entry joined with the acting user's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLogWithUser {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: DbId,
    pub timestamp: Timestamp,
    pub ip_address: Option<String>,
    pub details: String,
}

/// DTO for inserting a new audit log entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub user_id: DbId,
    pub action: String,
    pub resource_type: String,
    pub resource_id: DbId,
    pub ip_address: Option<String>,
    pub details: String,
}

/// Filter parameters for querying audit logs.
#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub user_id: Option<DbId>,
    pub action: Option<String>,
    pub resource_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One page of audit log results plus the total match count.
#[derive(Debug, Serialize)]
pub struct AuditLogPage {
    pub items: Vec<AuditLogWithUser>,
    pub total: i64,
}
