use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campus_core::error::CoreError;
use serde_json::json;

/// Error type returned by every handler.
///
/// Domain failures arrive as [`CoreError`] and database failures as
/// [`sqlx::Error`], both via `?`. The [`IntoResponse`] impl turns any
/// variant into the `{"error", "code"}` JSON shape clients expect.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain-level failure from `campus_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Anything sqlx reports; classified further in `db_response`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed input that DTO validation did not catch.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Catch-all for failures whose details must stay out of responses.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Shorthand for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// The sanitized payload shared by every 500 response.
fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Core(core) => core_response(core),
            AppError::Database(err) => db_response(&err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Unhandled internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error onto (status, code, client message).
///
/// `Internal` details are logged and replaced with a generic message;
/// every other variant's message is already written for the client.
fn core_response(err: CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal domain error");
            internal()
        }
    }
}

/// Classify a sqlx error into (status, code, client message).
///
/// - `RowNotFound` becomes a 404.
/// - 23505 on a `uq_*` constraint becomes a 409 (duplicate value).
/// - 23503 becomes a 400 (the request referenced a missing row).
/// - Everything else is logged and sanitized to a 500.
fn db_response(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if matches!(err, sqlx::Error::RowNotFound) {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        match db_err.code().as_deref() {
            Some("23505") if constraint.starts_with("uq_") => {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value for unique constraint {constraint}"),
                );
            }
            Some("23503") => {
                return (
                    StatusCode::BAD_REQUEST,
                    "BAD_REQUEST",
                    format!("Referenced row does not exist: {constraint}"),
                );
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Database error");
    internal()
}
