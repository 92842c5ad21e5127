pub mod admin;
pub mod auth;
pub mod faculty;
pub mod health;
pub mod profile;
pub mod student;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every path keeps its trailing slash; `/users` and `/users/` are
/// distinct and only the latter exists.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login/                      login (public)
/// /auth/token/refresh/              refresh access token (public)
/// /auth/logout/                     logout (requires auth)
/// /auth/register/                   self-registration (public)
///
/// /profile/                         get, update own profile (requires auth)
///
/// /users/                           list, create (admin only)
/// /users/{id}/                      get, update, delete
/// /users/{id}/reset-password/       reset password (POST)
///
/// /admin/dashboard/                 entity counts (admin only)
/// /admin/departments/               list, create
/// /admin/departments/{id}/          get, update, delete
/// /admin/semesters/                 list, create
/// /admin/semesters/{id}/            get, update, delete
/// /admin/sections/                  list, create
/// /admin/sections/{id}/             get, update, delete
/// /admin/subjects/                  list, create
/// /admin/subjects/{id}/             get, update, delete
/// /admin/notifications/             list, create
/// /admin/notifications/{id}/        get, delete
/// /admin/audit-logs/                query audit trail (?user_id, action, ...)
///
/// /faculty/dashboard/               teaching load summary (faculty only)
/// /faculty/students/                students across taught sections
/// /faculty/attendance/mark/         bulk-mark one class (POST)
/// /faculty/attendance/              marked records (?subject_id, date_from, ...)
///
/// /student/dashboard/               enrollment summary (student only)
/// /student/attendance/              own records plus totals (?subject_id)
/// /student/subjects/                enrolled subjects with attendance
/// /student/notifications/           visible notifications
/// /student/notifications/{id}/read/ mark one read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, register).
        .nest("/auth", auth::router())
        // Self-service profile for any authenticated user.
        .merge(profile::router())
        // Admin user management.
        .merge(users::router())
        // Admin back office: departments, semesters, sections, subjects,
        // notifications, audit logs, dashboard.
        .nest("/admin", admin::router())
        // Faculty tools: roster, attendance marking and history.
        .nest("/faculty", faculty::router())
        // Student self-service: attendance, subjects, notifications.
        .nest("/student", student::router())
}
