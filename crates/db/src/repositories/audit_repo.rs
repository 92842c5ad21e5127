//! Repository for the `audit_logs` table.
//!
//! Audit rows are written once and never updated.

use sqlx::PgPool;

use crate::models::audit::{AuditLog, AuditLogWithUser, AuditQuery, CreateAuditLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, action, resource_type, resource_id, timestamp, \
                        ip_address, details";

/// Column list resolving the acting user's username.
const USER_COLUMNS: &str = "\
    a.id, a.user_id, u.username, a.action, a.resource_type, a.resource_id, \
    a.timestamp, a.ip_address, a.details";

/// Provides insert and query operations for audit logs.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Insert a new audit log entry, returning the created row.
    pub async fn insert(pool: &PgPool, input: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs (user_id, action, resource_type, resource_id, \
                                     ip_address, details)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(&input.resource_type)
            .bind(input.resource_id)
            .bind(&input.ip_address)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// Query audit logs with filtering and pagination, newest first.
    pub async fn query(
        pool: &PgPool,
        params: &AuditQuery,
    ) -> Result<Vec<AuditLogWithUser>, sqlx::Error> {
        let limit = params.limit.unwrap_or(50).min(500);
        let offset = params.offset.unwrap_or(0);

        let (where_clause, bind_values, bind_idx) = build_audit_filter(params);

        let query = format!(
            "SELECT {USER_COLUMNS} FROM audit_logs a \
             JOIN users u ON u.id = a.user_id \
             {where_clause} \
             ORDER BY a.timestamp DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, AuditLogWithUser>(&query);
        for val in &bind_values {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
            }
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count audit logs matching the given filter (for pagination).
    pub async fn count(pool: &PgPool, params: &AuditQuery) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_audit_filter(params);

        let query = format!("SELECT COUNT(*)::BIGINT FROM audit_logs a {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for val in &bind_values {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
            }
        }
        q.fetch_one(pool).await
    }
}

/// Typed bind value for dynamically-built audit log queries.
enum BindValue {
    BigInt(i64),
    Text(String),
}

/// Build a WHERE clause and bind values from `AuditQuery` filter
/// parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The
/// `where_clause` is empty if no filters are active, or starts with
/// `WHERE `.
fn build_audit_filter(params: &AuditQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(user_id) = params.user_id {
        conditions.push(format!("a.user_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(user_id));
    }

    if let Some(ref action) = params.action {
        conditions.push(format!("a.action = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(action.clone()));
    }

    if let Some(ref resource_type) = params.resource_type {
        conditions.push(format!("a.resource_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(resource_type.clone()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}
