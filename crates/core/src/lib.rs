//! Domain core for the campus records backend.
//!
//! Pure types and logic shared by the data and API layers: the error
//! taxonomy, role enumeration, authorization policy predicates, attendance
//! aggregation math, and input validation helpers. Nothing in this crate
//! performs I/O.

pub mod attendance;
pub mod error;
pub mod policy;
pub mod roles;
pub mod types;
pub mod validation;
