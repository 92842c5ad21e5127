//! Routes under `/faculty`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{dashboard, faculty};
use crate::state::AppState;

/// Router for the `/faculty` subtree.
///
/// All routes require the `faculty` role (enforced by handler
/// extractors).
///
/// ```text
/// GET  /dashboard/        -> faculty_dashboard
/// GET  /students/         -> my_students
/// POST /attendance/mark/  -> mark_attendance
/// GET  /attendance/       -> attendance_records
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/", get(dashboard::faculty_dashboard))
        .route("/students/", get(faculty::my_students))
        .route("/attendance/mark/", post(faculty::mark_attendance))
        .route("/attendance/", get(faculty::attendance_records))
}
