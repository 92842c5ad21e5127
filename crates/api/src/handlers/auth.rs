//! Handlers for the `/auth` resource (login, refresh, logout, register).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use campus_core::error::CoreError;
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_core::validation::{validate_email, validate_password_pair};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use campus_db::models::session::CreateSession;
use campus_db::models::user::{CreateUser, UserResponse};
use campus_db::repositories::{SessionRepo, UserRepo};

use crate::audit;
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login/`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/token/refresh/`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Request body for `POST /auth/logout/`.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Request body for `POST /auth/register/`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: String,
    #[serde(default)]
    pub department: Option<DbId>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: LoginUser,
}

/// Compact user summary embedded in [`LoginResponse`].
///
/// `department` carries the department's display name, not its id.
#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub department: Option<String>,
    pub full_name: String,
}

/// Successful token refresh response.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Successful registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login/
///
/// Authenticate with username + password. Returns an access token, a refresh
/// token, and a compact user summary.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Opportunistic housekeeping: drop expired/revoked sessions.
    let purged = SessionRepo::cleanup_expired(&state.pool).await?;
    if purged > 0 {
        tracing::debug!(purged, "Purged stale sessions");
    }

    // 1. Find user by username. Indistinguishable from a bad password.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    // 2. Check if the account is active.
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 3. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    // 4. On success: stamp last_login_at and mint tokens.
    UserRepo::record_login(&state.pool, user.id).await?;

    let (access, refresh) = issue_tokens(&state, user.id, user.role, &headers).await?;

    // 5. Resolve department/semester/section names for the summary.
    let ctx = UserRepo::find_with_context(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::InternalError("User vanished during login".into()))?;

    audit::record(
        &state.pool,
        user.id,
        "login",
        "user",
        user.id,
        audit::client_ip(&headers),
        format!("User '{}' logged in", user.username),
    )
    .await;

    let full_name = ctx.full_name();
    Ok(Json(LoginResponse {
        access,
        refresh,
        user: LoginUser {
            id: ctx.id,
            username: ctx.username,
            email: ctx.email,
            role: ctx.role,
            department: ctx.department_name,
            full_name,
        },
    }))
}

/// POST /api/v1/auth/token/refresh/
///
/// Exchange a valid refresh token for a new access token. The refresh token
/// itself is not rotated; it stays valid until logout or expiry.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let token_hash = hash_refresh_token(&input.refresh);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let access = generate_access_token(user.id, user.role.as_str(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(RefreshResponse { access }))
}

/// POST /api/v1/auth/logout/
///
/// Blacklist the supplied refresh token. Returns 204 No Content. Revoking a
/// token that is already revoked or was never issued still succeeds; only a
/// missing/empty token field is an error.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<LogoutRequest>,
) -> AppResult<StatusCode> {
    let token = match input.refresh.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Refresh token is required".into(),
            )))
        }
    };

    let token_hash = hash_refresh_token(token);
    let revoked = SessionRepo::revoke_by_token_hash(&state.pool, &token_hash).await?;
    tracing::debug!(user_id = auth_user.user_id, revoked, "Logout");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/register/
///
/// Self-service registration. Validates the password pair and email, hashes
/// the password, creates the account, and logs the new user straight in.
/// Duplicate username/email surfaces as 409 from the unique indexes.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    validate_password_pair(&input.password, &input.password_confirm)
        .map_err(AppError::Core)?;
    validate_email(&input.email).map_err(AppError::Core)?;
    let role: Role = input.role.parse().map_err(AppError::Core)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let created = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            role,
            department_id: input.department,
            semester_id: None,
            section_id: None,
        },
    )
    .await?;

    let (access, refresh) = issue_tokens(&state, created.id, created.role, &headers).await?;

    let ctx = UserRepo::find_with_context(&state.pool, created.id)
        .await?
        .ok_or_else(|| AppError::InternalError("User vanished during registration".into()))?;

    audit::record(
        &state.pool,
        created.id,
        "register",
        "user",
        created.id,
        audit::client_ip(&headers),
        format!("New {} account '{}' registered", created.role, created.username),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            access,
            refresh,
            user: ctx.into(),
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mint an access + refresh token pair and persist the session row.
async fn issue_tokens(
    state: &AppState,
    user_id: DbId,
    role: Role,
    headers: &HeaderMap,
) -> AppResult<(String, String)> {
    let access = generate_access_token(user_id, role.as_str(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id,
            refresh_token_hash: refresh_hash,
            expires_at,
            user_agent: audit::user_agent(headers),
            ip_address: audit::client_ip(headers),
        },
    )
    .await?;

    Ok((access, refresh_plaintext))
}
