//! Repository for the `departments` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::department::{
    CreateDepartment, Department, DepartmentWithHod, UpdateDepartment,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, hod_id, created_at, updated_at";

/// Column list resolving the head-of-department's username.
const HOD_COLUMNS: &str = "\
    d.id, d.name, d.code, d.hod_id, h.username AS hod_name, \
    d.created_at, d.updated_at";

/// Provides CRUD operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Insert a new department, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDepartment,
    ) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (name, code, hod_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.hod_id)
            .fetch_one(pool)
            .await
    }

    /// Find a department by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a department with its HOD's username resolved.
    pub async fn find_with_hod(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DepartmentWithHod>, sqlx::Error> {
        let query = format!(
            "SELECT {HOD_COLUMNS} FROM departments d \
             LEFT JOIN users h ON h.id = d.hod_id \
             WHERE d.id = $1"
        );
        sqlx::query_as::<_, DepartmentWithHod>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all departments with HOD usernames resolved, by name.
    pub async fn list_with_hod(pool: &PgPool) -> Result<Vec<DepartmentWithHod>, sqlx::Error> {
        let query = format!(
            "SELECT {HOD_COLUMNS} FROM departments d \
             LEFT JOIN users h ON h.id = d.hod_id \
             ORDER BY d.name"
        );
        sqlx::query_as::<_, DepartmentWithHod>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a department. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDepartment,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                hod_id = COALESCE($4, hod_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.hod_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a department. Returns `true` if a row was removed.
    ///
    /// Users pointing at it are detached (department_id set NULL);
    /// its semesters cascade away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
