//! Access-token and refresh-token primitives.
//!
//! Access tokens are short-lived HS256 JWTs carrying a [`Claims`]
//! payload. Refresh tokens are opaque random strings; the server keeps
//! only their SHA-256 digest, so a leaked sessions table cannot be
//! replayed.

use campus_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset or empty, or if an expiry
    /// override does not parse.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry = |var: &str, default: i64| -> i64 {
            match std::env::var(var) {
                Ok(raw) => raw
                    .parse()
                    .unwrap_or_else(|_| panic!("{var} must be a valid i64")),
                Err(_) => default,
            }
        };

        Self {
            secret,
            access_token_expiry_mins: expiry("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: expiry("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }
}

/// Claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's internal database id.
    pub sub: DbId,
    /// The user's role name (`"admin"`, `"hod"`, `"faculty"`, `"student"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token id (UUID v4), available for audit correlation.
    pub jti: String,
}

/// Sign an access token for `user_id` acting as `role`.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued = chrono::Utc::now();
    let expires = issued + chrono::Duration::minutes(config.access_token_expiry_mins);

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: expires.timestamp(),
        iat: issued.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify an access token's signature and expiry, returning its [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// Mint a fresh refresh token.
///
/// Returns `(plaintext, sha256_hex)`. The plaintext goes to the client;
/// only the digest is persisted.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let digest = hash_refresh_token(&plaintext);
    (plaintext, digest)
}

/// SHA-256 hex digest of a refresh token, for storage and lookup.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
