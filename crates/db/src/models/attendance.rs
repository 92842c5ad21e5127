//! Attendance entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `attendance` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub student_id: DbId,
    pub subject_id: DbId,
    pub date: NaiveDate,
    pub is_present: bool,
    pub marked_by_id: Option<DbId>,
    pub marked_at: Timestamp,
}

/// One student's mark within a bulk attendance submission.
#[derive(Debug, Clone, Copy)]
pub struct StudentMark {
    pub student_id: DbId,
    pub is_present: bool,
}

/// Attendance joined with student and subject names, as the faculty
/// records endpoint returns it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    /// Student's username.
    pub student: String,
    /// Student's full name.
    pub student_name: String,
    /// Subject name.
    pub subject: String,
    pub date: NaiveDate,
    pub is_present: bool,
    /// Username of the user who marked this record, if still present.
    pub marked_by: Option<String>,
}

/// A student's own attendance row with the subject resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentAttendanceRecord {
    pub id: DbId,
    /// Subject name.
    pub subject: String,
    pub date: NaiveDate,
    pub is_present: bool,
    /// Username of the user who marked this record, if still present.
    pub marked_by: Option<String>,
}

/// Filter parameters for listing a faculty member's attendance records.
#[derive(Debug, Default, Deserialize)]
pub struct AttendanceQuery {
    pub subject_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Raw present/total counts for one (student, subject) pair.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct AttendanceCounts {
    pub total: i64,
    pub present: i64,
}
