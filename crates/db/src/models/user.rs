//! User entity model and DTOs.

use campus_core::roles::Role;
use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department_id: Option<DbId>,
    pub semester_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// User row joined with the names of its department, semester, and
/// section, as the user-facing endpoints return it.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithContext {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department_id: Option<DbId>,
    pub department_name: Option<String>,
    pub semester_id: Option<DbId>,
    pub semester_number: Option<i32>,
    pub section_id: Option<DbId>,
    pub section_name: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl UserWithContext {
    /// Display name in "First Last" form, trimmed when either part is
    /// empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Safe user representation for API responses (no password hash).
///
/// `date_joined` and `last_login` are the external names for the
/// account creation and last login timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department: Option<DbId>,
    pub department_name: Option<String>,
    pub semester: Option<DbId>,
    pub semester_number: Option<i32>,
    pub section: Option<DbId>,
    pub section_name: Option<String>,
    pub is_active: bool,
    pub date_joined: Timestamp,
    pub last_login: Option<Timestamp>,
}

impl From<UserWithContext> for UserResponse {
    fn from(u: UserWithContext) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            role: u.role,
            department: u.department_id,
            department_name: u.department_name,
            semester: u.semester_id,
            semester_number: u.semester_number,
            section: u.section_id,
            section_name: u.section_name,
            is_active: u.is_active,
            date_joined: u.created_at,
            last_login: u.last_login_at,
        }
    }
}

/// DTO for creating a new user. The password is already hashed by the
/// time it reaches the repository.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department_id: Option<DbId>,
    pub semester_id: Option<DbId>,
    pub section_id: Option<DbId>,
}

/// DTO for updating an existing user. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub department_id: Option<DbId>,
    pub semester_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub is_active: Option<bool>,
}

/// Filter parameters for listing users.
#[derive(Debug, Default, Deserialize)]
pub struct UserListFilter {
    pub role: Option<Role>,
    pub department_id: Option<DbId>,
    pub section_id: Option<DbId>,
}
