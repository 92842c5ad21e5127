//! Handlers for the faculty-only `/faculty` endpoints: roster listing,
//! attendance marking, and attendance queries.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use campus_db::models::attendance::{AttendanceQuery, AttendanceRecord, StudentMark};
use campus_db::models::user::UserResponse;
use campus_db::repositories::{AttendanceRepo, SectionRepo, SubjectRepo, UserRepo};

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireFaculty;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /faculty/attendance/mark/`.
///
/// The key fields are optional so their absence is a domain-level 400
/// with a single message, not a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub section_id: Option<DbId>,
    #[serde(default)]
    pub subject_id: Option<DbId>,
    #[serde(default)]
    pub present_student_ids: Vec<DbId>,
}

/// Response body for `POST /faculty/attendance/mark/`.
#[derive(Debug, Serialize)]
pub struct MarkAttendanceResponse {
    pub message: String,
    pub marked_count: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/faculty/students/
///
/// The distinct students in sections reached by the caller's subjects.
pub async fn my_students(
    State(state): State<AppState>,
    RequireFaculty(faculty): RequireFaculty,
) -> AppResult<Json<Vec<UserResponse>>> {
    let students = UserRepo::list_students_of_faculty(&state.pool, faculty.user_id).await?;
    Ok(Json(students.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/v1/faculty/attendance/mark/
///
/// Mark a whole section's attendance for one subject and date. Every
/// student of the section gets a row: present when listed in
/// `present_student_ids`, absent otherwise. Re-marking the same class
/// overwrites in place. The write is transactional; a failure marks
/// nobody.
pub async fn mark_attendance(
    State(state): State<AppState>,
    RequireFaculty(faculty): RequireFaculty,
    headers: HeaderMap,
    Json(input): Json<MarkAttendanceRequest>,
) -> AppResult<Json<MarkAttendanceResponse>> {
    // 1. All three key fields are required.
    let (date_raw, section_id, subject_id) = match (&input.date, input.section_id, input.subject_id)
    {
        (Some(date), Some(section_id), Some(subject_id)) => (date, section_id, subject_id),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Date, section_id, and subject_id are required".into(),
            )))
        }
    };

    let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d").map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "Invalid date '{date_raw}'. Expected YYYY-MM-DD"
        )))
    })?;

    // 2. Resolve the section and subject.
    let section = SectionRepo::find_by_id(&state.pool, section_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "section",
            id: section_id,
        }))?;

    let subject = SubjectRepo::find_by_id(&state.pool, subject_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "subject",
            id: subject_id,
        }))?;

    // 3. The caller must teach this subject, and the subject must belong
    //    to the section's semester.
    if subject.faculty_assigned_id != Some(faculty.user_id)
        || subject.semester_id != section.semester_id
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not authorized to mark attendance for this class".into(),
        )));
    }

    // 4. Full roster of the section; omitted students flip to absent.
    let students = UserRepo::list_students_in_section(&state.pool, section.id).await?;

    let marks: Vec<StudentMark> = students
        .iter()
        .map(|student| StudentMark {
            student_id: student.id,
            is_present: input.present_student_ids.contains(&student.id),
        })
        .collect();

    // 5. One transaction for the whole roster. A failure here is
    //    reported as a 400 carrying the underlying message.
    let marked_count =
        AttendanceRepo::bulk_mark(&state.pool, subject.id, date, faculty.user_id, &marks)
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to mark attendance: {e}")))?;

    audit::record(
        &state.pool,
        faculty.user_id,
        "mark_attendance",
        "attendance",
        subject.id,
        audit::client_ip(&headers),
        format!(
            "Marked attendance for {marked_count} students in '{}' on {date}",
            subject.name
        ),
    )
    .await;

    Ok(Json(MarkAttendanceResponse {
        message: format!("Attendance marked for {marked_count} students"),
        marked_count,
    }))
}

/// GET /api/v1/faculty/attendance/?subject_id=&section_id=&date_from=&date_to=
///
/// Attendance rows across the caller's subjects, newest first, capped
/// at 50.
pub async fn attendance_records(
    State(state): State<AppState>,
    RequireFaculty(faculty): RequireFaculty,
    Query(params): Query<AttendanceQuery>,
) -> AppResult<Json<Vec<AttendanceRecord>>> {
    let records = AttendanceRepo::list_records(&state.pool, faculty.user_id, &params).await?;
    Ok(Json(records))
}
