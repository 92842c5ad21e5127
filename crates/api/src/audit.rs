//! Best-effort audit trail writes.
//!
//! Mutating handlers append an entry after the fact. A failed write is
//! logged and swallowed; the audit trail never fails a request that
//! already succeeded.

use axum::http::HeaderMap;
use campus_core::types::DbId;
use campus_db::models::audit::CreateAuditLog;
use campus_db::repositories::AuditLogRepo;
use campus_db::DbPool;

/// Append one audit entry for an action `user_id` performed on
/// (`resource_type`, `resource_id`).
pub async fn record(
    pool: &DbPool,
    user_id: DbId,
    action: &str,
    resource_type: &str,
    resource_id: DbId,
    ip_address: Option<String>,
    details: String,
) {
    let entry = CreateAuditLog {
        user_id,
        action: action.to_string(),
        resource_type: resource_type.to_string(),
        resource_id,
        ip_address,
        details,
    };

    if let Err(err) = AuditLogRepo::insert(pool, &entry).await {
        tracing::warn!(
            error = %err,
            action,
            resource_type,
            resource_id,
            "Failed to write audit log entry"
        );
    }
}

/// Client IP as reported by the nearest proxy (first `x-forwarded-for`
/// entry), if any.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// The request's `User-Agent` header, if any.
pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
