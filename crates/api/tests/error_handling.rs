//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no HTTP
//! server or database is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use campus_api::error::AppError;
use campus_core::error::CoreError;
use http_body_util::BodyExt;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// Each variant lands on its status and code, with the message passed
/// through verbatim.
#[tokio::test]
async fn variants_map_to_status_code_and_message() {
    let cases = [
        (
            AppError::Core(CoreError::Validation(
                "Invalid semester number 9. Must be between 1 and 8".into(),
            )),
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Invalid semester number 9. Must be between 1 and 8",
        ),
        (
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            )),
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid username or password",
        ),
        (
            AppError::Core(CoreError::Forbidden(
                "Only admins can access this endpoint".into(),
            )),
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "Only admins can access this endpoint",
        ),
        (
            AppError::Core(CoreError::Conflict("duplicate code".into())),
            StatusCode::CONFLICT,
            "CONFLICT",
            "duplicate code",
        ),
        (
            AppError::BadRequest("Failed to mark attendance: boom".into()),
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "Failed to mark attendance: boom",
        ),
    ];

    for (err, want_status, want_code, want_message) in cases {
        let label = format!("{err:?}");
        let (status, json) = error_to_response(err).await;

        assert_eq!(status, want_status, "wrong status for {label}");
        assert_eq!(json["code"], want_code, "wrong code for {label}");
        assert_eq!(json["error"], want_message, "wrong message for {label}");
    }
}

/// NotFound spells out the entity and id in the client message.
#[tokio::test]
async fn not_found_names_the_entity() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "section",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "section with id 42 not found");
}

/// Internal error details must never leak to the client.
#[tokio::test]
async fn internal_errors_are_sanitized() {
    for err in [
        AppError::InternalError("connection to 10.0.0.3 refused".into()),
        AppError::Core(CoreError::Internal("cache poisoned".into())),
    ] {
        let (status, json) = error_to_response(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
        assert!(
            !json.to_string().contains("10.0.0.3"),
            "response must not leak internal details"
        );
    }
}

/// A sqlx `RowNotFound` surfaces as a plain 404.
#[tokio::test]
async fn sqlx_row_not_found_returns_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Resource not found");
}
