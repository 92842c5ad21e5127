//! Repository for the `subjects` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::subject::{CreateSubject, Subject, SubjectWithFaculty, UpdateSubject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, credits, semester_id, department_id, \
                        faculty_assigned_id, created_at, updated_at";

/// Column list resolving the assigned faculty member's full name.
/// NULLIF keeps the name NULL rather than empty when no faculty is
/// assigned.
const FACULTY_COLUMNS: &str = "\
    s.id, s.name, s.code, s.credits, s.semester_id, s.department_id, \
    s.faculty_assigned_id, \
    NULLIF(TRIM(CONCAT(f.first_name, ' ', f.last_name)), '') AS faculty_name, \
    s.created_at";

/// Provides CRUD operations for subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    /// Insert a new subject, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSubject) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (name, code, credits, semester_id, department_id, \
                                   faculty_assigned_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.credits)
            .bind(input.semester_id)
            .bind(input.department_id)
            .bind(input.faculty_assigned_id)
            .fetch_one(pool)
            .await
    }

    /// Find a subject by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a subject with its faculty member's name resolved.
    pub async fn find_with_faculty(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SubjectWithFaculty>, sqlx::Error> {
        let query = format!(
            "SELECT {FACULTY_COLUMNS} FROM subjects s \
             LEFT JOIN users f ON f.id = s.faculty_assigned_id \
             WHERE s.id = $1"
        );
        sqlx::query_as::<_, SubjectWithFaculty>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all subjects with faculty names resolved, by code.
    pub async fn list_with_faculty(pool: &PgPool) -> Result<Vec<SubjectWithFaculty>, sqlx::Error> {
        let query = format!(
            "SELECT {FACULTY_COLUMNS} FROM subjects s \
             LEFT JOIN users f ON f.id = s.faculty_assigned_id \
             ORDER BY s.code"
        );
        sqlx::query_as::<_, SubjectWithFaculty>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the subjects offered in a semester, with faculty names.
    pub async fn list_for_semester(
        pool: &PgPool,
        semester_id: DbId,
    ) -> Result<Vec<SubjectWithFaculty>, sqlx::Error> {
        let query = format!(
            "SELECT {FACULTY_COLUMNS} FROM subjects s \
             LEFT JOIN users f ON f.id = s.faculty_assigned_id \
             WHERE s.semester_id = $1 \
             ORDER BY s.code"
        );
        sqlx::query_as::<_, SubjectWithFaculty>(&query)
            .bind(semester_id)
            .fetch_all(pool)
            .await
    }

    /// Update a subject. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. The owning
    /// semester and department cannot be changed after creation.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubject,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                credits = COALESCE($4, credits),
                faculty_assigned_id = COALESCE($5, faculty_assigned_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.credits)
            .bind(input.faculty_assigned_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a subject. Returns `true` if a row was removed.
    ///
    /// Attendance recorded against it cascades away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
