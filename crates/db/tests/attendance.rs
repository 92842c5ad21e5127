//! Integration tests for attendance marking and aggregation.
//!
//! Covers the full-roster upsert (one row per student per date, re-marks
//! overwrite in place) and the count queries behind the summaries.

use campus_core::roles::Role;
use campus_db::models::attendance::{AttendanceQuery, StudentMark};
use campus_db::models::department::CreateDepartment;
use campus_db::models::section::CreateSection;
use campus_db::models::semester::CreateSemester;
use campus_db::models::subject::CreateSubject;
use campus_db::models::user::{CreateUser, User};
use campus_db::repositories::{
    AttendanceRepo, DepartmentRepo, SectionRepo, SemesterRepo, SubjectRepo, UserRepo,
};
use chrono::NaiveDate;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fixture: department/semester/section, one faculty, three students
// ---------------------------------------------------------------------------

struct Classroom {
    subject_id: i64,
    faculty: User,
    students: Vec<User>,
}

async fn classroom(pool: &PgPool) -> Classroom {
    let dept = DepartmentRepo::create(
        pool,
        &CreateDepartment {
            name: "Computer Science".to_string(),
            code: "CS".to_string(),
            hod_id: None,
        },
    )
    .await
    .unwrap();

    let semester = SemesterRepo::create(
        pool,
        &CreateSemester {
            number: 1,
            academic_year: "2024-25".to_string(),
            department_id: dept.id,
        },
    )
    .await
    .unwrap();

    let section = SectionRepo::create(
        pool,
        &CreateSection {
            name: "A".to_string(),
            semester_id: semester.id,
            faculty_incharge_id: None,
        },
    )
    .await
    .unwrap();

    let faculty = UserRepo::create(
        pool,
        &CreateUser {
            username: "prof".to_string(),
            email: "prof@campus.test".to_string(),
            password_hash: "x".to_string(),
            first_name: "Pat".to_string(),
            last_name: "Lee".to_string(),
            role: Role::Faculty,
            department_id: Some(dept.id),
            semester_id: None,
            section_id: None,
        },
    )
    .await
    .unwrap();

    let subject = SubjectRepo::create(
        pool,
        &CreateSubject {
            name: "Programming".to_string(),
            code: "CS101".to_string(),
            credits: 4,
            semester_id: semester.id,
            department_id: dept.id,
            faculty_assigned_id: Some(faculty.id),
        },
    )
    .await
    .unwrap();

    let mut students = Vec::new();
    for name in ["s1", "s2", "s3"] {
        let student = UserRepo::create(
            pool,
            &CreateUser {
                username: name.to_string(),
                email: format!("{name}@campus.test"),
                password_hash: "x".to_string(),
                first_name: String::new(),
                last_name: String::new(),
                role: Role::Student,
                department_id: Some(dept.id),
                semester_id: Some(semester.id),
                section_id: Some(section.id),
            },
        )
        .await
        .unwrap();
        students.push(student);
    }

    Classroom {
        subject_id: subject.id,
        faculty,
        students,
    }
}

fn marks_for(students: &[User], present_ids: &[i64]) -> Vec<StudentMark> {
    students
        .iter()
        .map(|s| StudentMark {
            student_id: s.id,
            is_present: present_ids.contains(&s.id),
        })
        .collect()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

// ---------------------------------------------------------------------------
// Test: bulk mark creates one row per student
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_mark_creates_row_per_student(pool: PgPool) {
    let class = classroom(&pool).await;
    let (s1, s2, s3) = (
        class.students[0].id,
        class.students[1].id,
        class.students[2].id,
    );

    let marks = marks_for(&class.students, &[s1, s2]);
    let n = AttendanceRepo::bulk_mark(&pool, class.subject_id, day(1), class.faculty.id, &marks)
        .await
        .unwrap();
    assert_eq!(n, 3);

    // Present exactly when listed.
    let counts_s1 = AttendanceRepo::counts_for_student(&pool, s1, Some(class.subject_id))
        .await
        .unwrap();
    assert_eq!((counts_s1.total, counts_s1.present), (1, 1));

    let counts_s3 = AttendanceRepo::counts_for_student(&pool, s3, Some(class.subject_id))
        .await
        .unwrap();
    assert_eq!((counts_s3.total, counts_s3.present), (1, 0));

    for id in [s1, s2, s3] {
        let rows: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM attendance \
             WHERE student_id = $1 AND subject_id = $2 AND date = $3",
        )
        .bind(id)
        .bind(class.subject_id)
        .bind(day(1))
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(rows.0, 1);
    }
}

// ---------------------------------------------------------------------------
// Test: re-marking the same date overwrites, never duplicates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_remark_overwrites_in_place(pool: PgPool) {
    let class = classroom(&pool).await;
    let (s1, s2, s3) = (
        class.students[0].id,
        class.students[1].id,
        class.students[2].id,
    );

    let first = marks_for(&class.students, &[s1, s2]);
    AttendanceRepo::bulk_mark(&pool, class.subject_id, day(1), class.faculty.id, &first)
        .await
        .unwrap();

    // Re-run with only s3 present: s1 and s2 flip to absent.
    let second = marks_for(&class.students, &[s3]);
    AttendanceRepo::bulk_mark(&pool, class.subject_id, day(1), class.faculty.id, &second)
        .await
        .unwrap();

    for (id, expect_present) in [(s1, false), (s2, false), (s3, true)] {
        let counts = AttendanceRepo::counts_for_student(&pool, id, Some(class.subject_id))
            .await
            .unwrap();
        assert_eq!(counts.total, 1, "row count per key must stay 1");
        assert_eq!(counts.present > 0, expect_present);
    }
}

// ---------------------------------------------------------------------------
// Test: counts across multiple dates feed the percentage
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_counts_accumulate_across_dates(pool: PgPool) {
    let class = classroom(&pool).await;
    let s1 = class.students[0].id;

    // s1 present on days 1 and 2, absent on day 3.
    for (d, present) in [(1, true), (2, true), (3, false)] {
        let present_ids = if present { vec![s1] } else { vec![] };
        let marks = marks_for(&class.students, &present_ids);
        AttendanceRepo::bulk_mark(&pool, class.subject_id, day(d), class.faculty.id, &marks)
            .await
            .unwrap();
    }

    let counts = AttendanceRepo::counts_for_student(&pool, s1, Some(class.subject_id))
        .await
        .unwrap();
    assert_eq!((counts.total, counts.present), (3, 2));

    // No subject filter covers all subjects (here the same one).
    let all = AttendanceRepo::counts_for_student(&pool, s1, None)
        .await
        .unwrap();
    assert_eq!(all.total, 3);

    // A student with no attendance yet counts zero.
    let fresh = UserRepo::create(
        &pool,
        &CreateUser {
            username: "s4".to_string(),
            email: "s4@campus.test".to_string(),
            password_hash: "x".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            role: Role::Student,
            department_id: None,
            semester_id: None,
            section_id: None,
        },
    )
    .await
    .unwrap();
    let none = AttendanceRepo::counts_for_student(&pool, fresh.id, None)
        .await
        .unwrap();
    assert_eq!((none.total, none.present), (0, 0));
}

// ---------------------------------------------------------------------------
// Test: faculty record listing joins names and respects filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_records_for_faculty(pool: PgPool) {
    let class = classroom(&pool).await;
    let s1 = class.students[0].id;

    let marks = marks_for(&class.students, &[s1]);
    AttendanceRepo::bulk_mark(&pool, class.subject_id, day(1), class.faculty.id, &marks)
        .await
        .unwrap();
    AttendanceRepo::bulk_mark(&pool, class.subject_id, day(2), class.faculty.id, &marks)
        .await
        .unwrap();

    let all = AttendanceRepo::list_records(&pool, class.faculty.id, &AttendanceQuery::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 6);
    // Newest date first, names resolved.
    assert_eq!(all[0].date, day(2));
    assert_eq!(all[0].subject, "Programming");
    assert_eq!(all[0].marked_by.as_deref(), Some("prof"));

    let ranged = AttendanceRepo::list_records(
        &pool,
        class.faculty.id,
        &AttendanceQuery {
            date_from: Some(day(2)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(ranged.len(), 3);

    // Another faculty member sees nothing.
    let outsider = UserRepo::create(
        &pool,
        &CreateUser {
            username: "other".to_string(),
            email: "other@campus.test".to_string(),
            password_hash: "x".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            role: Role::Faculty,
            department_id: None,
            semester_id: None,
            section_id: None,
        },
    )
    .await
    .unwrap();
    let theirs = AttendanceRepo::list_records(&pool, outsider.id, &AttendanceQuery::default())
        .await
        .unwrap();
    assert!(theirs.is_empty());
}
