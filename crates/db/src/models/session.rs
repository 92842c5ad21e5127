//! Refresh-token session model and DTOs.

use campus_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One refresh-token session, as stored in `user_sessions`.
///
/// The table also carries an `updated_at` column maintained by trigger;
/// the repository never reads it, so it is not mapped here.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    /// SHA-256 hex digest of the refresh token. The plaintext is never stored.
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
}

/// Insert payload for a new session row.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}
