//! Handlers for the student-only `/student` endpoints: own attendance,
//! enrolled subjects, and notification visibility.

use axum::extract::{Path, Query, State};
use axum::Json;
use campus_core::attendance::AttendanceSummary;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use serde::{Deserialize, Serialize};

use campus_db::models::attendance::StudentAttendanceRecord;
use campus_db::models::notification::NotificationWithSender;
use campus_db::models::user::UserWithContext;
use campus_db::repositories::{
    AttendanceRepo, NotificationRepo, SectionRepo, SubjectRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStudent;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct MyAttendanceQuery {
    pub subject_id: Option<DbId>,
}

/// Response body for `GET /student/attendance/`: the raw records plus
/// the aggregate over exactly those records.
#[derive(Debug, Serialize)]
pub struct MyAttendanceResponse {
    pub attendance_records: Vec<StudentAttendanceRecord>,
    pub total_classes: i64,
    pub present_classes: i64,
    pub absent_classes: i64,
    pub attendance_percentage: f64,
}

/// One enrolled subject with the caller's per-subject attendance.
#[derive(Debug, Serialize)]
pub struct EnrolledSubject {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub faculty: Option<String>,
    pub total_classes: i64,
    pub present_classes: i64,
    pub attendance_percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Load the caller's joined profile row. The row can vanish between
/// token issuance and the request, so a miss is a 404 rather than a
/// panic.
async fn load_context(state: &AppState, student: AuthUser) -> AppResult<UserWithContext> {
    UserRepo::find_with_context(&state.pool, student.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: student.user_id,
        }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/student/attendance/?subject_id=
///
/// The caller's own attendance rows, newest first, with totals over
/// the same filter.
pub async fn my_attendance(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
    Query(params): Query<MyAttendanceQuery>,
) -> AppResult<Json<MyAttendanceResponse>> {
    let records =
        AttendanceRepo::list_for_student(&state.pool, student.user_id, params.subject_id).await?;
    let counts =
        AttendanceRepo::counts_for_student(&state.pool, student.user_id, params.subject_id).await?;
    let summary = AttendanceSummary::from_counts(counts.present, counts.total);

    Ok(Json(MyAttendanceResponse {
        attendance_records: records,
        total_classes: summary.total,
        present_classes: summary.present,
        absent_classes: summary.absent,
        attendance_percentage: summary.percentage,
    }))
}

/// GET /api/v1/student/subjects/
///
/// Subjects of the caller's section's semester, each with the caller's
/// per-subject attendance summary. A student without a section has no
/// enrollment, which is a 400 rather than an empty list.
pub async fn my_subjects(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
) -> AppResult<Json<Vec<EnrolledSubject>>> {
    let context = load_context(&state, student).await?;

    let section_id = context.section_id.ok_or(AppError::Core(CoreError::Validation(
        "Student is not assigned to a section".into(),
    )))?;

    let section = SectionRepo::find_by_id(&state.pool, section_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "section",
            id: section_id,
        }))?;

    let subjects = SubjectRepo::list_for_semester(&state.pool, section.semester_id).await?;

    let mut enrolled = Vec::with_capacity(subjects.len());
    for subject in subjects {
        let counts =
            AttendanceRepo::counts_for_student(&state.pool, student.user_id, Some(subject.id))
                .await?;
        let summary = AttendanceSummary::from_counts(counts.present, counts.total);
        enrolled.push(EnrolledSubject {
            id: subject.id,
            name: subject.name,
            code: subject.code,
            faculty: subject.faculty_name,
            total_classes: summary.total,
            present_classes: summary.present,
            attendance_percentage: summary.percentage,
        });
    }

    Ok(Json(enrolled))
}

/// GET /api/v1/student/notifications/
///
/// Unexpired notifications addressed to students (or everyone), either
/// campus-wide or scoped to the caller's department.
pub async fn my_notifications(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
) -> AppResult<Json<Vec<NotificationWithSender>>> {
    let context = load_context(&state, student).await?;
    let notifications = NotificationRepo::list_visible(
        &state.pool,
        student.role.as_str(),
        context.department_id,
    )
    .await?;
    Ok(Json(notifications))
}

/// POST /api/v1/student/notifications/{id}/read/
///
/// Mark a notification as read. Notifications outside the caller's
/// visibility are indistinguishable from missing ones.
pub async fn mark_notification_read(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let context = load_context(&state, student).await?;
    let marked = NotificationRepo::mark_read_if_visible(
        &state.pool,
        id,
        student.role.as_str(),
        context.department_id,
    )
    .await?;

    if !marked {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "notification",
            id,
        }));
    }

    Ok(Json(MessageResponse {
        message: "Notification marked as read".into(),
    }))
}
