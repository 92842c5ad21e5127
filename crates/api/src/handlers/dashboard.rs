//! Handlers for the role dashboards: read-only aggregates, one
//! endpoint per role.

use axum::extract::State;
use axum::Json;
use campus_core::attendance::AttendanceSummary;
use campus_core::error::CoreError;
use serde::Serialize;

use campus_db::repositories::{AttendanceRepo, DashboardRepo, SectionRepo, SemesterRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireFaculty, RequireStudent};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for `GET /admin/dashboard/`.
#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub user_count: i64,
    pub department_count: i64,
    pub semester_count: i64,
    pub section_count: i64,
    pub subject_count: i64,
    pub message: String,
}

/// Response body for `GET /faculty/dashboard/`.
#[derive(Debug, Serialize)]
pub struct FacultyDashboard {
    pub faculty_name: String,
    pub department: Option<String>,
    pub subjects_taught: i64,
    pub sections_assigned: i64,
    pub message: String,
}

/// Response body for `GET /student/dashboard/`.
#[derive(Debug, Serialize)]
pub struct StudentDashboard {
    pub student_name: String,
    pub department: Option<String>,
    /// Semester number, resolved through the student's section.
    pub semester: Option<i32>,
    pub section: Option<String>,
    pub enrolled_subjects: i64,
    pub attendance_percentage: f64,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/dashboard/
///
/// Campus-wide entity totals.
pub async fn admin_dashboard(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<AdminDashboard>> {
    let user = UserRepo::find_by_id(&state.pool, admin.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: admin.user_id,
        }))?;

    let counts = DashboardRepo::admin_counts(&state.pool).await?;

    Ok(Json(AdminDashboard {
        user_count: counts.user_count,
        department_count: counts.department_count,
        semester_count: counts.semester_count,
        section_count: counts.section_count,
        subject_count: counts.subject_count,
        message: format!("Welcome, {}!", user.username),
    }))
}

/// GET /api/v1/faculty/dashboard/
///
/// The caller's teaching load: subjects taught and sections reached.
pub async fn faculty_dashboard(
    State(state): State<AppState>,
    RequireFaculty(faculty): RequireFaculty,
) -> AppResult<Json<FacultyDashboard>> {
    let ctx = UserRepo::find_with_context(&state.pool, faculty.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: faculty.user_id,
        }))?;

    let counts = DashboardRepo::faculty_counts(&state.pool, faculty.user_id).await?;

    let name = display_name(&ctx.full_name(), &ctx.username);
    Ok(Json(FacultyDashboard {
        faculty_name: name.clone(),
        department: ctx.department_name,
        subjects_taught: counts.subjects_taught,
        sections_assigned: counts.sections_assigned,
        message: format!("Welcome, {name}!"),
    }))
}

/// GET /api/v1/student/dashboard/
///
/// The caller's enrolment summary plus their overall attendance
/// percentage. Semester and subject count resolve through the section,
/// so a student without a section sees nulls and zero.
pub async fn student_dashboard(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
) -> AppResult<Json<StudentDashboard>> {
    let ctx = UserRepo::find_with_context(&state.pool, student.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: student.user_id,
        }))?;

    let mut semester_number = None;
    let mut enrolled_subjects = 0;
    if let Some(section_id) = ctx.section_id {
        if let Some(section) = SectionRepo::find_by_id(&state.pool, section_id).await? {
            let semester = SemesterRepo::find_by_id(&state.pool, section.semester_id).await?;
            semester_number = semester.map(|s| s.number);
            enrolled_subjects =
                DashboardRepo::enrolled_subject_count(&state.pool, section.semester_id).await?;
        }
    }

    let counts = AttendanceRepo::counts_for_student(&state.pool, student.user_id, None).await?;
    let summary = AttendanceSummary::from_counts(counts.present, counts.total);

    let name = display_name(&ctx.full_name(), &ctx.username);
    Ok(Json(StudentDashboard {
        student_name: name.clone(),
        department: ctx.department_name,
        semester: semester_number,
        section: ctx.section_name,
        enrolled_subjects,
        attendance_percentage: summary.percentage,
        message: format!("Welcome, {name}!"),
    }))
}

/// Full name with a username fallback for accounts without one.
fn display_name(full_name: &str, username: &str) -> String {
    if full_name.is_empty() {
        username.to_string()
    } else {
        full_name.to_string()
    }
}
