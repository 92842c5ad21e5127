//! Aggregate count rows backing the role dashboards.

use sqlx::FromRow;

/// Entity totals shown on the admin dashboard.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct AdminCounts {
    pub user_count: i64,
    pub department_count: i64,
    pub semester_count: i64,
    pub section_count: i64,
    pub subject_count: i64,
}

/// Teaching load shown on the faculty dashboard.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct FacultyCounts {
    pub subjects_taught: i64,
    pub sections_assigned: i64,
}
