//! Routes under `/admin`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{audit, dashboard, departments, notifications, sections, semesters, subjects};
use crate::state::AppState;

/// Router for the `/admin` subtree.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /dashboard/           -> admin_dashboard
/// GET    /departments/         -> list_departments
/// POST   /departments/         -> create_department
/// GET    /departments/{id}/    -> get_department
/// PUT    /departments/{id}/    -> update_department
/// DELETE /departments/{id}/    -> delete_department
/// GET    /semesters/           -> list_semesters
/// POST   /semesters/           -> create_semester
/// GET    /semesters/{id}/      -> get_semester
/// PUT    /semesters/{id}/      -> update_semester
/// DELETE /semesters/{id}/      -> delete_semester
/// GET    /sections/            -> list_sections
/// POST   /sections/            -> create_section
/// GET    /sections/{id}/       -> get_section
/// PUT    /sections/{id}/       -> update_section
/// DELETE /sections/{id}/       -> delete_section
/// GET    /subjects/            -> list_subjects
/// POST   /subjects/            -> create_subject
/// GET    /subjects/{id}/       -> get_subject
/// PUT    /subjects/{id}/       -> update_subject
/// DELETE /subjects/{id}/       -> delete_subject
/// GET    /notifications/       -> list_notifications
/// POST   /notifications/       -> create_notification
/// GET    /notifications/{id}/  -> get_notification
/// DELETE /notifications/{id}/  -> delete_notification
/// GET    /audit-logs/          -> list_audit_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/", get(dashboard::admin_dashboard))
        .route(
            "/departments/",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/departments/{id}/",
            get(departments::get_department)
                .put(departments::update_department)
                .delete(departments::delete_department),
        )
        .route(
            "/semesters/",
            get(semesters::list_semesters).post(semesters::create_semester),
        )
        .route(
            "/semesters/{id}/",
            get(semesters::get_semester)
                .put(semesters::update_semester)
                .delete(semesters::delete_semester),
        )
        .route(
            "/sections/",
            get(sections::list_sections).post(sections::create_section),
        )
        .route(
            "/sections/{id}/",
            get(sections::get_section)
                .put(sections::update_section)
                .delete(sections::delete_section),
        )
        .route(
            "/subjects/",
            get(subjects::list_subjects).post(subjects::create_subject),
        )
        .route(
            "/subjects/{id}/",
            get(subjects::get_subject)
                .put(subjects::update_subject)
                .delete(subjects::delete_subject),
        )
        .route(
            "/notifications/",
            get(notifications::list_notifications).post(notifications::create_notification),
        )
        .route(
            "/notifications/{id}/",
            get(notifications::get_notification).delete(notifications::delete_notification),
        )
        .route("/audit-logs/", get(audit::list_audit_logs))
}
