//! User roles and notification audiences.
//!
//! A user has exactly one role, stored as lowercase TEXT in the `users`
//! table. Notification targeting reuses the same strings plus the
//! broadcast audience `"all"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The four user roles, ordered by decreasing privilege.
///
/// `Hod` is the head of a department; `Faculty` teaches sections within
/// a department; `Student` belongs to one department/semester/section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hod,
    Faculty,
    Student,
}

impl Role {
    /// The lowercase wire/storage name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Hod => ROLE_HOD,
            Role::Faculty => ROLE_FACULTY,
            Role::Student => ROLE_STUDENT,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_HOD => Ok(Role::Hod),
            ROLE_FACULTY => Ok(Role::Faculty),
            ROLE_STUDENT => Ok(Role::Student),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_HOD: &str = "hod";
pub const ROLE_FACULTY: &str = "faculty";
pub const ROLE_STUDENT: &str = "student";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_HOD, ROLE_FACULTY, ROLE_STUDENT];

// ---------------------------------------------------------------------------
// Notification audiences
// ---------------------------------------------------------------------------

/// Broadcast audience: the notification is visible regardless of role.
pub const AUDIENCE_ALL: &str = "all";

/// All valid notification recipient audiences.
pub const VALID_RECIPIENT_ROLES: &[&str] =
    &[AUDIENCE_ALL, ROLE_ADMIN, ROLE_HOD, ROLE_FACULTY, ROLE_STUDENT];

/// Validate that a notification audience string is one of the accepted
/// values.
pub fn validate_recipient_role(audience: &str) -> Result<(), CoreError> {
    if VALID_RECIPIENT_ROLES.contains(&audience) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid recipient role '{audience}'. Must be one of: {}",
            VALID_RECIPIENT_ROLES.join(", ")
        )))
    }
}

/// Whether a notification addressed to `audience` is visible to a user
/// holding `role`.
pub fn audience_matches(audience: &str, role: Role) -> bool {
    audience == AUDIENCE_ALL || audience == role.as_str()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
