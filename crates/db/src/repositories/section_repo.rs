//! Repository for the `sections` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::section::{CreateSection, Section, UpdateSection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, semester_id, faculty_incharge_id, student_count, \
                        created_at, updated_at";

/// Provides CRUD operations for sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Insert a new section, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSection) -> Result<Section, sqlx::Error> {
        let query = format!(
            "INSERT INTO sections (name, semester_id, faculty_incharge_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(&input.name)
            .bind(input.semester_id)
            .bind(input.faculty_incharge_id)
            .fetch_one(pool)
            .await
    }

    /// Find a section by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections WHERE id = $1");
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all sections, grouped by semester then name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections ORDER BY semester_id, name");
        sqlx::query_as::<_, Section>(&query).fetch_all(pool).await
    }

    /// List the sections of one semester.
    pub async fn list_for_semester(
        pool: &PgPool,
        semester_id: DbId,
    ) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sections WHERE semester_id = $1 ORDER BY name"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(semester_id)
            .fetch_all(pool)
            .await
    }

    /// Update a section. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. The owning
    /// semester cannot be changed after creation.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSection,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!(
            "UPDATE sections SET
                name = COALESCE($2, name),
                faculty_incharge_id = COALESCE($3, faculty_incharge_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.faculty_incharge_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a section. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute the denormalized student_count from the users table.
    ///
    /// Called after any change to a student's section assignment.
    pub async fn refresh_student_count(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE sections SET student_count = ( \
                 SELECT COUNT(*) FROM users \
                 WHERE section_id = $1 AND role = 'student') \
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
