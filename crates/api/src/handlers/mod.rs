//! HTTP request handlers, one module per resource.

pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod faculty;
pub mod notifications;
pub mod profile;
pub mod sections;
pub mod semesters;
pub mod student;
pub mod subjects;
pub mod users;

use campus_core::error::CoreError;
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_db::repositories::UserRepo;
use campus_db::DbPool;

use crate::error::{AppError, AppResult};

/// Validate that `user_id` references an existing user holding `role`.
///
/// Used wherever a payload assigns a role-bearing reference (a
/// department's HOD, a section's or subject's faculty member) so a wrong
/// assignment is a 400 instead of slipping into the row.
pub(crate) async fn ensure_role(
    pool: &DbPool,
    user_id: DbId,
    role: Role,
    field: &str,
) -> AppResult<()> {
    let user = UserRepo::find_by_id(pool, user_id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "{field} {user_id} does not reference an existing user"
        )))
    })?;

    if user.role != role {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{field} must reference a user with role '{role}'"
        ))));
    }
    Ok(())
}
