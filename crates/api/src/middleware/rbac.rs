//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match the gate. Gates are exact-role: an admin calling a faculty endpoint
//! is rejected like anyone else. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use campus_core::error::CoreError;
use campus_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

macro_rules! define_role_gate {
    (
        $(#[$meta:meta])*
        $name:ident, $role:expr, $denied:literal
    ) => {
        $(#[$meta])*
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let user = AuthUser::from_request_parts(parts, state).await?;
                if user.role != $role {
                    return Err(AppError::Core(CoreError::Forbidden($denied.into())));
                }
                Ok($name(user))
            }
        }
    };
}

define_role_gate! {
    /// Admits only the `admin` role; anyone else gets 403.
    ///
    /// ```ignore
    /// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
    ///     // user is guaranteed to be an admin here
    ///     Ok(Json(()))
    /// }
    /// ```
    RequireAdmin, Role::Admin, "Only admins can access this endpoint"
}

define_role_gate! {
    /// Admits only the `faculty` role; anyone else gets 403.
    RequireFaculty, Role::Faculty, "Only faculty members can access this endpoint"
}

define_role_gate! {
    /// Admits only the `student` role; anyone else gets 403.
    RequireStudent, Role::Student, "Only students can access this endpoint"
}

/// Admits any authenticated user.
///
/// Same effect as extracting [`AuthUser`] directly, but the wrapper
/// keeps route signatures uniform with the role gates above.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
