//! Field validation shared by registration and the admin CRUD surface.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Semester numbers run 1 through 8 (a four-year programme).
pub const MIN_SEMESTER_NUMBER: i32 = 1;
pub const MAX_SEMESTER_NUMBER: i32 = 8;

/// Regex pattern matching academic years like `2024-25`.
pub const ACADEMIC_YEAR_PATTERN: &str = r"^\d{4}-\d{2}$";

/// Compiled academic-year regex. Compiled once, reused forever.
static ACADEMIC_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ACADEMIC_YEAR_PATTERN).expect("valid regex"));

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a password meets the minimum length.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that two password fields agree and meet the minimum length.
pub fn validate_password_pair(password: &str, confirm: &str) -> Result<(), CoreError> {
    if password != confirm {
        return Err(CoreError::Validation(
            "Passwords do not match".to_string(),
        ));
    }
    validate_password(password)
}

/// Validate an email address (RFC 5321 shape, per the `validator` crate).
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid email address '{email}'"
        )))
    }
}

/// Validate an academic year string (`YYYY-YY`, e.g. `2024-25`).
pub fn validate_academic_year(academic_year: &str) -> Result<(), CoreError> {
    if ACADEMIC_YEAR_RE.is_match(academic_year) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid academic year '{academic_year}'. Expected YYYY-YY format, e.g. 2024-25"
        )))
    }
}

/// Validate that a semester number is within 1..=8.
pub fn validate_semester_number(number: i32) -> Result<(), CoreError> {
    if (MIN_SEMESTER_NUMBER..=MAX_SEMESTER_NUMBER).contains(&number) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid semester number {number}. Must be between {MIN_SEMESTER_NUMBER} and {MAX_SEMESTER_NUMBER}"
        )))
    }
}

/// Validate that a subject's credit count is positive.
pub fn validate_credits(credits: i32) -> Result<(), CoreError> {
    if credits > 0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid credits {credits}. Must be a positive number"
        )))
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
