//! Repository for the `user_sessions` table.
//!
//! One row per issued refresh token. Revocation flips `is_revoked`
//! rather than deleting, so a blacklisted token stays blacklisted even
//! if presented again before cleanup runs.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, \
                        user_agent, ip_address, created_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Look up a live session by token digest.
    ///
    /// Revoked and expired rows never match, so a hit means the
    /// presented refresh token is still good.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions \
             WHERE refresh_token_hash = $1 AND is_revoked = false AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Persist a newly issued refresh token.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions \
                 (user_id, refresh_token_hash, expires_at, user_agent, ip_address) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Revoke the session holding `hash`, whatever its current state.
    ///
    /// Returns `true` when a row with that digest exists at all, so
    /// revoking an already-revoked token still reports success.
    pub async fn revoke_by_token_hash(pool: &PgPool, hash: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE user_sessions SET is_revoked = true WHERE refresh_token_hash = $1")
                .bind(hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every active session a user holds. Returns the count revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true \
             WHERE is_revoked = false AND user_id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Drop rows that can never authenticate again. Returns the count deleted.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_sessions WHERE is_revoked = true OR expires_at < NOW()")
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
