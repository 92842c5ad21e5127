//! Aggregate count queries backing the role dashboards.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::dashboard::{AdminCounts, FacultyCounts};

/// Provides the count aggregates shown on dashboards.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Entity totals for the admin dashboard, in one round trip.
    pub async fn admin_counts(pool: &PgPool) -> Result<AdminCounts, sqlx::Error> {
        sqlx::query_as::<_, AdminCounts>(
            "SELECT \
                (SELECT COUNT(*) FROM users) AS user_count, \
                (SELECT COUNT(*) FROM departments) AS department_count, \
                (SELECT COUNT(*) FROM semesters) AS semester_count, \
                (SELECT COUNT(*) FROM sections) AS section_count, \
                (SELECT COUNT(*) FROM subjects) AS subject_count",
        )
        .fetch_one(pool)
        .await
    }

    /// Teaching load for one faculty member: subjects they teach and
    /// the distinct sections those subjects reach (sections sharing the
    /// subject's semester).
    pub async fn faculty_counts(
        pool: &PgPool,
        faculty_id: DbId,
    ) -> Result<FacultyCounts, sqlx::Error> {
        sqlx::query_as::<_, FacultyCounts>(
            "SELECT \
                (SELECT COUNT(*) FROM subjects WHERE faculty_assigned_id = $1) \
                    AS subjects_taught, \
                (SELECT COUNT(DISTINCT s.id) FROM sections s \
                    JOIN subjects sub ON sub.semester_id = s.semester_id \
                    WHERE sub.faculty_assigned_id = $1) \
                    AS sections_assigned",
        )
        .bind(faculty_id)
        .fetch_one(pool)
        .await
    }

    /// How many subjects a semester offers (the student dashboard's
    /// enrolled-subject count).
    pub async fn enrolled_subject_count(
        pool: &PgPool,
        semester_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM subjects WHERE semester_id = $1")
                .bind(semester_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
