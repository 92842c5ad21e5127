//! Semester entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `semesters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Semester {
    pub id: DbId,
    pub number: i32,
    pub academic_year: String,
    pub department_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new semester.
#[derive(Debug, Deserialize)]
pub struct CreateSemester {
    pub number: i32,
    pub academic_year: String,
    pub department_id: DbId,
}

/// DTO for updating a semester. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSemester {
    pub number: Option<i32>,
    pub academic_year: Option<String>,
    pub is_active: Option<bool>,
}
