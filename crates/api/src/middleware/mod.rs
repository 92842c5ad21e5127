//! Request extractors for authentication and role gating.
//!
//! [`auth::AuthUser`] resolves the Bearer token into an identity; the
//! [`rbac`] gates ([`rbac::RequireAdmin`], [`rbac::RequireFaculty`],
//! [`rbac::RequireStudent`], [`rbac::RequireAuth`]) sit on top of it and
//! reject the wrong role with 403.

pub mod auth;
pub mod rbac;
