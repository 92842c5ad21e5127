//! Repository for the `attendance` table.

use campus_core::types::DbId;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::attendance::{
    AttendanceCounts, AttendanceQuery, AttendanceRecord, StudentAttendanceRecord, StudentMark,
};

/// Cap on rows returned by the faculty records listing.
const RECORDS_LIMIT: i64 = 50;

/// Column list for record listings joined with student/subject names.
const RECORD_COLUMNS: &str = "\
    a.id, st.username AS student, \
    TRIM(CONCAT(st.first_name, ' ', st.last_name)) AS student_name, \
    sub.name AS subject, a.date, a.is_present, m.username AS marked_by";

/// Provides marking and query operations for attendance.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Upsert one row per student for (subject, date) inside a single
    /// transaction.
    ///
    /// Conflicts on `(student_id, subject_id, date)` overwrite
    /// `is_present` and `marked_by_id` in place, so re-marking a class
    /// resyncs the whole roster without creating duplicates. Returns
    /// the number of students processed.
    pub async fn bulk_mark(
        pool: &PgPool,
        subject_id: DbId,
        date: NaiveDate,
        marked_by_id: DbId,
        marks: &[StudentMark],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = "INSERT INTO attendance (student_id, subject_id, date, is_present, marked_by_id) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (student_id, subject_id, date) \
             DO UPDATE SET is_present = EXCLUDED.is_present, \
                           marked_by_id = EXCLUDED.marked_by_id";

        for mark in marks {
            sqlx::query(query)
                .bind(mark.student_id)
                .bind(subject_id)
                .bind(date)
                .bind(mark.is_present)
                .bind(marked_by_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(marks.len() as u64)
    }

    /// List attendance rows for the subjects a faculty member teaches,
    /// newest first, capped at 50 rows.
    ///
    /// Each filter field narrows the result when set; `section_id`
    /// filters on the student's section.
    pub async fn list_records(
        pool: &PgPool,
        faculty_id: DbId,
        params: &AttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let mut conditions = vec!["sub.faculty_assigned_id = $1".to_string()];
        let mut bind_idx = 2u32;
        let mut bind_values: Vec<BindValue> = Vec::new();

        if let Some(subject_id) = params.subject_id {
            conditions.push(format!("a.subject_id = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::BigInt(subject_id));
        }
        if let Some(section_id) = params.section_id {
            conditions.push(format!("st.section_id = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::BigInt(section_id));
        }
        if let Some(date_from) = params.date_from {
            conditions.push(format!("a.date >= ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::Date(date_from));
        }
        if let Some(date_to) = params.date_to {
            conditions.push(format!("a.date <= ${bind_idx}"));
            let _ = bind_idx;
            bind_values.push(BindValue::Date(date_to));
        }

        let query = format!(
            "SELECT {RECORD_COLUMNS} \
             FROM attendance a \
             JOIN users st ON st.id = a.student_id \
             JOIN subjects sub ON sub.id = a.subject_id \
             LEFT JOIN users m ON m.id = a.marked_by_id \
             WHERE {} \
             ORDER BY a.date DESC, a.marked_at DESC \
             LIMIT {RECORDS_LIMIT}",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, AttendanceRecord>(&query).bind(faculty_id);
        for val in &bind_values {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Date(v) => q = q.bind(*v),
            }
        }
        q.fetch_all(pool).await
    }

    /// List a student's own attendance rows, newest first, optionally
    /// narrowed to one subject.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
        subject_id: Option<DbId>,
    ) -> Result<Vec<StudentAttendanceRecord>, sqlx::Error> {
        let base = "SELECT a.id, sub.name AS subject, a.date, a.is_present, \
                           m.username AS marked_by \
                    FROM attendance a \
                    JOIN subjects sub ON sub.id = a.subject_id \
                    LEFT JOIN users m ON m.id = a.marked_by_id \
                    WHERE a.student_id = $1";

        match subject_id {
            Some(subject_id) => {
                let query =
                    format!("{base} AND a.subject_id = $2 ORDER BY a.date DESC, a.marked_at DESC");
                sqlx::query_as::<_, StudentAttendanceRecord>(&query)
                    .bind(student_id)
                    .bind(subject_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("{base} ORDER BY a.date DESC, a.marked_at DESC");
                sqlx::query_as::<_, StudentAttendanceRecord>(&query)
                    .bind(student_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Count total and present classes for a student, optionally
    /// narrowed to one subject.
    pub async fn counts_for_student(
        pool: &PgPool,
        student_id: DbId,
        subject_id: Option<DbId>,
    ) -> Result<AttendanceCounts, sqlx::Error> {
        let base = "SELECT COUNT(*) AS total, \
                           COUNT(*) FILTER (WHERE is_present) AS present \
                    FROM attendance WHERE student_id = $1";

        match subject_id {
            Some(subject_id) => {
                let query = format!("{base} AND subject_id = $2");
                sqlx::query_as::<_, AttendanceCounts>(&query)
                    .bind(student_id)
                    .bind(subject_id)
                    .fetch_one(pool)
                    .await
            }
            None => sqlx::query_as::<_, AttendanceCounts>(base)
                .bind(student_id)
                .fetch_one(pool)
                .await,
        }
    }
}

/// Typed bind value for dynamically-built record queries.
enum BindValue {
    BigInt(i64),
    Date(NaiveDate),
}
