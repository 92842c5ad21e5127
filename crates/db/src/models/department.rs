//! Department entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub hod_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Department joined with its head-of-department's username, as the
/// admin endpoints return it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentWithHod {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub hod_id: Option<DbId>,
    pub hod_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new department.
#[derive(Debug, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
    pub code: String,
    pub hod_id: Option<DbId>,
}

/// DTO for updating a department. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDepartment {
    pub name: Option<String>,
    pub code: Option<String>,
    pub hod_id: Option<DbId>,
}
