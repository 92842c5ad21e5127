//! Object-level authorization predicates.
//!
//! Pure functions of (actor, target); no I/O, no side effects. Deny is
//! the default for every case the rules do not explicitly allow. Route
//! handlers evaluate these before touching the database.

use crate::roles::Role;
use crate::types::DbId;

/// The fields of a user that authorization decisions depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRef {
    pub id: DbId,
    pub role: Role,
    pub department_id: Option<DbId>,
}

impl UserRef {
    pub fn new(id: DbId, role: Role, department_id: Option<DbId>) -> Self {
        Self {
            id,
            role,
            department_id,
        }
    }
}

/// Whether `actor` may modify (update or delete) `target`.
///
/// Allowed when any of the following holds:
/// 1. `actor` and `target` are the same user (self-edit);
/// 2. `actor` is an admin;
/// 3. `actor` is an HOD and `target` is faculty or a student in the
///    actor's department;
/// 4. `actor` is faculty and `target` is a student in the actor's
///    department (department-level, not class-level).
///
/// Department comparison is on the raw foreign keys, so two users with
/// no department compare equal.
pub fn can_modify_user(actor: UserRef, target: UserRef) -> bool {
    if actor.id == target.id {
        return true;
    }

    match actor.role {
        Role::Admin => true,
        Role::Hod => {
            matches!(target.role, Role::Faculty | Role::Student)
                && actor.department_id == target.department_id
        }
        Role::Faculty => {
            target.role == Role::Student && actor.department_id == target.department_id
        }
        Role::Student => false,
    }
}
