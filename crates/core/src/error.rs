//! Domain error taxonomy.
//!
//! Request handling maps these onto HTTP statuses: `Validation` → 400,
//! `Unauthorized` → 401, `Forbidden` → 403, `NotFound` → 404,
//! `Conflict` → 409, `Internal` → 500. Every error is request-local;
//! nothing here is retried or fatal to the process.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or missing input (bad date, out-of-range semester, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness rule was violated (duplicate username, subject code, ...).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Credentials or token could not be verified.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller's role or ownership does not permit the operation.
    /// Messages stay generic so callers cannot probe which check failed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
