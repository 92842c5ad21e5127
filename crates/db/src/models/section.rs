//! Section entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    pub name: String,
    pub semester_id: DbId,
    pub faculty_incharge_id: Option<DbId>,
    pub student_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new section.
#[derive(Debug, Deserialize)]
pub struct CreateSection {
    pub name: String,
    pub semester_id: DbId,
    pub faculty_incharge_id: Option<DbId>,
}

/// DTO for updating a section. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSection {
    pub name: Option<String>,
    pub faculty_incharge_id: Option<DbId>,
}
