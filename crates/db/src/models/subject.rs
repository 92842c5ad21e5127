//! Subject entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub credits: i32,
    pub semester_id: DbId,
    pub department_id: DbId,
    pub faculty_assigned_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Subject joined with the assigned faculty member's full name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubjectWithFaculty {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub credits: i32,
    pub semester_id: DbId,
    pub department_id: DbId,
    pub faculty_assigned_id: Option<DbId>,
    pub faculty_name: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new subject.
#[derive(Debug, Deserialize)]
pub struct CreateSubject {
    pub name: String,
    pub code: String,
    pub credits: i32,
    pub semester_id: DbId,
    pub department_id: DbId,
    pub faculty_assigned_id: Option<DbId>,
}

/// DTO for updating a subject. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubject {
    pub name: Option<String>,
    pub code: Option<String>,
    pub credits: Option<i32>,
    pub faculty_assigned_id: Option<DbId>,
}
