//! Repository for the `semesters` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::semester::{CreateSemester, Semester, UpdateSemester};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, number, academic_year, department_id, is_active, \
                        created_at, updated_at";

/// Provides CRUD operations for semesters.
pub struct SemesterRepo;

impl SemesterRepo {
    /// Insert a new semester, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSemester) -> Result<Semester, sqlx::Error> {
        let query = format!(
            "INSERT INTO semesters (number, academic_year, department_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Semester>(&query)
            .bind(input.number)
            .bind(&input.academic_year)
            .bind(input.department_id)
            .fetch_one(pool)
            .await
    }

    /// Find a semester by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Semester>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM semesters WHERE id = $1");
        sqlx::query_as::<_, Semester>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all semesters, grouped by department then number.
    pub async fn list(pool: &PgPool) -> Result<Vec<Semester>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM semesters ORDER BY department_id, academic_year, number"
        );
        sqlx::query_as::<_, Semester>(&query).fetch_all(pool).await
    }

    /// List the semesters of one department.
    pub async fn list_for_department(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<Semester>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM semesters \
             WHERE department_id = $1 \
             ORDER BY academic_year, number"
        );
        sqlx::query_as::<_, Semester>(&query)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }

    /// Update a semester. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. The owning
    /// department cannot be changed after creation.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSemester,
    ) -> Result<Option<Semester>, sqlx::Error> {
        let query = format!(
            "UPDATE semesters SET
                number = COALESCE($2, number),
                academic_year = COALESCE($3, academic_year),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Semester>(&query)
            .bind(id)
            .bind(input.number)
            .bind(&input.academic_year)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a semester. Returns `true` if a row was removed.
    ///
    /// Sections and subjects under it cascade away; enrolled users are
    /// detached.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM semesters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
