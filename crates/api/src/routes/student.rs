//! Routes under `/student`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{dashboard, student};
use crate::state::AppState;

/// Router for the `/student` subtree.
///
/// All routes require the `student` role (enforced by handler
/// extractors).
///
/// ```text
/// GET  /dashboard/                 -> student_dashboard
/// GET  /attendance/                -> my_attendance
/// GET  /subjects/                  -> my_subjects
/// GET  /notifications/             -> my_notifications
/// POST /notifications/{id}/read/   -> mark_notification_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/", get(dashboard::student_dashboard))
        .route("/attendance/", get(student::my_attendance))
        .route("/subjects/", get(student::my_subjects))
        .route("/notifications/", get(student::my_notifications))
        .route(
            "/notifications/{id}/read/",
            post(student::mark_notification_read),
        )
}
