//! Attendance aggregation.
//!
//! The counting itself happens in SQL; this module turns raw counts
//! into the summary shape the dashboards and student endpoints return.

use serde::Serialize;

/// Aggregate attendance for one (student, subject) pair or one student
/// overall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub percentage: f64,
}

impl AttendanceSummary {
    /// Build a summary from `present` out of `total` marked classes.
    ///
    /// Percentage is `present / total * 100` rounded to two decimal
    /// places, and defined as `0.0` when no classes have been marked.
    pub fn from_counts(present: i64, total: i64) -> Self {
        let percentage = if total > 0 {
            round2(present as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        Self {
            total,
            present,
            absent: total - present,
            percentage,
        }
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
