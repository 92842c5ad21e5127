//! Repository for the `users` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User, UserListFilter, UserWithContext};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, role, \
                        department_id, semester_id, section_id, is_active, last_login_at, \
                        created_at, updated_at";

/// Column list for queries that resolve department, semester, and
/// section names alongside the user (no password hash).
const CONTEXT_COLUMNS: &str = "\
    u.id, u.username, u.email, u.first_name, u.last_name, u.role, \
    u.department_id, d.name AS department_name, \
    u.semester_id, sem.number AS semester_number, \
    u.section_id, sec.name AS section_name, \
    u.is_active, u.last_login_at, u.created_at";

/// Join clause pairing with [`CONTEXT_COLUMNS`].
const CONTEXT_JOINS: &str = "\
    FROM users u \
    LEFT JOIN departments d ON d.id = u.department_id \
    LEFT JOIN semesters sem ON sem.id = u.semester_id \
    LEFT JOIN sections sec ON sec.id = u.section_id";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, first_name, last_name, role, \
                                department_id, semester_id, section_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.role)
            .bind(input.department_id)
            .bind(input.semester_id)
            .bind(input.section_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user with its organisational names resolved.
    pub async fn find_with_context(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserWithContext>, sqlx::Error> {
        let query = format!("SELECT {CONTEXT_COLUMNS} {CONTEXT_JOINS} WHERE u.id = $1");
        sqlx::query_as::<_, UserWithContext>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List users with organisational names resolved, newest first.
    ///
    /// Each filter field narrows the result when set.
    pub async fn list_with_context(
        pool: &PgPool,
        filter: &UserListFilter,
    ) -> Result<Vec<UserWithContext>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if filter.role.is_some() {
            conditions.push(format!("u.role = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.department_id.is_some() {
            conditions.push(format!("u.department_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.section_id.is_some() {
            conditions.push(format!("u.section_id = ${bind_idx}"));
            let _ = bind_idx;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {CONTEXT_COLUMNS} {CONTEXT_JOINS} {where_clause} ORDER BY u.created_at DESC"
        );

        let mut q = sqlx::query_as::<_, UserWithContext>(&query);
        if let Some(role) = filter.role {
            q = q.bind(role);
        }
        if let Some(department_id) = filter.department_id {
            q = q.bind(department_id);
        }
        if let Some(section_id) = filter.section_id {
            q = q.bind(section_id);
        }
        q.fetch_all(pool).await
    }

    /// List the students enrolled in a section.
    pub async fn list_students_in_section(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE section_id = $1 AND role = 'student' \
             ORDER BY username"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(section_id)
            .fetch_all(pool)
            .await
    }

    /// List the students in every section whose semester offers a
    /// subject taught by the given faculty member.
    pub async fn list_students_of_faculty(
        pool: &PgPool,
        faculty_id: DbId,
    ) -> Result<Vec<UserWithContext>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT {CONTEXT_COLUMNS} {CONTEXT_JOINS} \
             WHERE u.role = 'student' AND u.section_id IN ( \
                 SELECT s.id FROM sections s \
                 JOIN subjects sub ON sub.semester_id = s.semester_id \
                 WHERE sub.faculty_assigned_id = $1) \
             ORDER BY u.username"
        );
        sqlx::query_as::<_, UserWithContext>(&query)
            .bind(faculty_id)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name),
                role = COALESCE($6, role),
                department_id = COALESCE($7, department_id),
                semester_id = COALESCE($8, semester_id),
                section_id = COALESCE($9, section_id),
                is_active = COALESCE($10, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.role)
            .bind(input.department_id)
            .bind(input.semester_id)
            .bind(input.section_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user. Returns `true` if a row was removed.
    ///
    /// The user's attendance rows cascade; departments and sections
    /// referencing the user fall back to NULL.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a successful login by setting `last_login_at` to now.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
