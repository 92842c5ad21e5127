//! HTTP-level integration tests for the faculty attendance flow:
//! bulk marking (with overwrite), authorization rules, the records
//! query, the roster listing, and the faculty dashboard.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get_auth, post_json, post_json_auth};
use campus_api::auth::password::hash_password;
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_db::models::department::CreateDepartment;
use campus_db::models::section::CreateSection;
use campus_db::models::semester::CreateSemester;
use campus_db::models::subject::CreateSubject;
use campus_db::models::user::{CreateUser, User};
use campus_db::repositories::{DepartmentRepo, SectionRepo, SemesterRepo, SubjectRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a user with a known password and optional org placement.
async fn seed_user(
    pool: &PgPool,
    username: &str,
    role: Role,
    department_id: Option<DbId>,
    semester_id: Option<DbId>,
    section_id: Option<DbId>,
) -> User {
    let hashed = hash_password("test_password_123").expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.edu"),
        password_hash: hashed,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        role,
        department_id,
        semester_id,
        section_id,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in via the API and return the access token.
async fn login(app: Router, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": "test_password_123" });
    let response = post_json(app, "/api/v1/auth/login/", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access"].as_str().unwrap().to_string()
}

/// A seeded department/semester/section/subject with one assigned
/// faculty member and three enrolled students.
struct Campus {
    section_id: DbId,
    subject_id: DbId,
    semester_id: DbId,
    department_id: DbId,
    faculty: User,
    students: Vec<User>,
}

async fn seed_campus(pool: &PgPool) -> Campus {
    let dept = DepartmentRepo::create(
        pool,
        &CreateDepartment {
            name: "Computer Science".to_string(),
            code: "CSE".to_string(),
            hod_id: None,
        },
    )
    .await
    .expect("department creation should succeed");

    let semester = SemesterRepo::create(
        pool,
        &CreateSemester {
            number: 3,
            academic_year: "2025-26".to_string(),
            department_id: dept.id,
        },
    )
    .await
    .expect("semester creation should succeed");

    let faculty = seed_user(pool, "prof_x", Role::Faculty, Some(dept.id), None, None).await;

    let section = SectionRepo::create(
        pool,
        &CreateSection {
            name: "A".to_string(),
            semester_id: semester.id,
            faculty_incharge_id: Some(faculty.id),
        },
    )
    .await
    .expect("section creation should succeed");

    let subject = SubjectRepo::create(
        pool,
        &CreateSubject {
            name: "Operating Systems".to_string(),
            code: "CS301".to_string(),
            credits: 4,
            semester_id: semester.id,
            department_id: dept.id,
            faculty_assigned_id: Some(faculty.id),
        },
    )
    .await
    .expect("subject creation should succeed");

    let mut students = Vec::new();
    for name in ["stu_anna", "stu_ben", "stu_cleo"] {
        let student = seed_user(
            pool,
            name,
            Role::Student,
            Some(dept.id),
            Some(semester.id),
            Some(section.id),
        )
        .await;
        students.push(student);
    }

    Campus {
        section_id: section.id,
        subject_id: subject.id,
        semester_id: semester.id,
        department_id: dept.id,
        faculty,
        students,
    }
}

// ---------------------------------------------------------------------------
// Marking
// ---------------------------------------------------------------------------

/// Marking covers the whole roster: listed students are present,
/// everyone else absent. Re-marking the same class overwrites in place
/// without growing the table.
#[sqlx::test(migrations = "../db/migrations")]
async fn mark_attendance_roundtrip(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let app = common::build_test_app(pool);
    let token = login(app.clone(), "prof_x").await;

    let body = serde_json::json!({
        "date": "2026-03-10",
        "section_id": campus.section_id,
        "subject_id": campus.subject_id,
        "present_student_ids": [campus.students[0].id, campus.students[1].id],
    });
    let response =
        post_json_auth(app.clone(), "/api/v1/faculty/attendance/mark/", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Attendance marked for 3 students");
    assert_eq!(json["marked_count"], 3);

    // All three students have a row; the unlisted one is absent.
    let uri = format!("/api/v1/faculty/attendance/?subject_id={}", campus.subject_id);
    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let records = body_json(response).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 3);
    let absent: Vec<_> = records
        .iter()
        .filter(|r| r["is_present"] == false)
        .map(|r| r["student"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(absent, vec!["stu_cleo"]);
    assert_eq!(records[0]["subject"], "Operating Systems");
    assert_eq!(records[0]["marked_by"], "prof_x");

    // Re-mark the same class with a different present list: still three
    // rows, now reflecting the correction.
    let body = serde_json::json!({
        "date": "2026-03-10",
        "section_id": campus.section_id,
        "subject_id": campus.subject_id,
        "present_student_ids": [campus.students[2].id],
    });
    let response =
        post_json_auth(app.clone(), "/api/v1/faculty/attendance/mark/", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &uri, &token).await;
    let records = body_json(response).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 3, "re-marking must not duplicate rows");
    let present: Vec<_> = records
        .iter()
        .filter(|r| r["is_present"] == true)
        .map(|r| r["student"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(present, vec!["stu_cleo"]);
}

/// All three key fields are required, with a single message.
#[sqlx::test(migrations = "../db/migrations")]
async fn mark_attendance_missing_fields(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let app = common::build_test_app(pool);
    let token = login(app.clone(), "prof_x").await;

    let body = serde_json::json!({ "date": "2026-03-10", "subject_id": campus.subject_id });
    let response = post_json_auth(app, "/api/v1/faculty/attendance/mark/", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Date, section_id, and subject_id are required");
}

/// Dates outside YYYY-MM-DD are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn mark_attendance_malformed_date(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let app = common::build_test_app(pool);
    let token = login(app.clone(), "prof_x").await;

    let body = serde_json::json!({
        "date": "10/03/2026",
        "section_id": campus.section_id,
        "subject_id": campus.subject_id,
    });
    let response = post_json_auth(app, "/api/v1/faculty/attendance/mark/", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid date '10/03/2026'. Expected YYYY-MM-DD");
}

/// Unknown section or subject ids are 404s.
#[sqlx::test(migrations = "../db/migrations")]
async fn mark_attendance_unknown_section(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let app = common::build_test_app(pool);
    let token = login(app.clone(), "prof_x").await;

    let body = serde_json::json!({
        "date": "2026-03-10",
        "section_id": 99_999,
        "subject_id": campus.subject_id,
    });
    let response = post_json_auth(app, "/api/v1/faculty/attendance/mark/", body, &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Only the assigned faculty member may mark a subject.
#[sqlx::test(migrations = "../db/migrations")]
async fn mark_attendance_requires_assignment(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    seed_user(&pool, "prof_y", Role::Faculty, Some(campus.department_id), None, None).await;
    let app = common::build_test_app(pool);
    let token = login(app.clone(), "prof_y").await;

    let body = serde_json::json!({
        "date": "2026-03-10",
        "section_id": campus.section_id,
        "subject_id": campus.subject_id,
    });
    let response = post_json_auth(app, "/api/v1/faculty/attendance/mark/", body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "You are not authorized to mark attendance for this class"
    );
}

/// The subject must belong to the section's semester, even for its own
/// faculty member.
#[sqlx::test(migrations = "../db/migrations")]
async fn mark_attendance_semester_mismatch(pool: PgPool) {
    let campus = seed_campus(&pool).await;

    // A section in a different semester of the same department.
    let other_semester = SemesterRepo::create(
        &pool,
        &CreateSemester {
            number: 5,
            academic_year: "2025-26".to_string(),
            department_id: campus.department_id,
        },
    )
    .await
    .expect("semester creation should succeed");
    let other_section = SectionRepo::create(
        &pool,
        &CreateSection {
            name: "B".to_string(),
            semester_id: other_semester.id,
            faculty_incharge_id: Some(campus.faculty.id),
        },
    )
    .await
    .expect("section creation should succeed");

    let app = common::build_test_app(pool);
    let token = login(app.clone(), "prof_x").await;

    let body = serde_json::json!({
        "date": "2026-03-10",
        "section_id": other_section.id,
        "subject_id": campus.subject_id,
    });
    let response = post_json_auth(app, "/api/v1/faculty/attendance/mark/", body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Records and roster
// ---------------------------------------------------------------------------

/// Date-range filters narrow the records listing.
#[sqlx::test(migrations = "../db/migrations")]
async fn attendance_records_date_filter(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let app = common::build_test_app(pool);
    let token = login(app.clone(), "prof_x").await;

    for date in ["2026-03-09", "2026-03-10"] {
        let body = serde_json::json!({
            "date": date,
            "section_id": campus.section_id,
            "subject_id": campus.subject_id,
            "present_student_ids": [campus.students[0].id],
        });
        let response =
            post_json_auth(app.clone(), "/api/v1/faculty/attendance/mark/", body, &token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_auth(app.clone(), "/api/v1/faculty/attendance/", &token).await;
    let all = body_json(response).await;
    assert_eq!(all.as_array().unwrap().len(), 6);

    let response = get_auth(
        app,
        "/api/v1/faculty/attendance/?date_from=2026-03-10",
        &token,
    )
    .await;
    let filtered = body_json(response).await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 3);
    assert!(filtered.iter().all(|r| r["date"] == "2026-03-10"));
}

/// The roster lists each enrolled student exactly once.
#[sqlx::test(migrations = "../db/migrations")]
async fn my_students_lists_roster(pool: PgPool) {
    let campus = seed_campus(&pool).await;

    // A second subject in the same semester must not duplicate students.
    SubjectRepo::create(
        &pool,
        &CreateSubject {
            name: "Databases".to_string(),
            code: "CS302".to_string(),
            credits: 3,
            semester_id: campus.semester_id,
            department_id: campus.department_id,
            faculty_assigned_id: Some(campus.faculty.id),
        },
    )
    .await
    .expect("subject creation should succeed");

    let app = common::build_test_app(pool);
    let token = login(app.clone(), "prof_x").await;

    let response = get_auth(app, "/api/v1/faculty/students/", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let usernames: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec!["stu_anna", "stu_ben", "stu_cleo"]);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// The faculty dashboard reflects teaching load and department.
#[sqlx::test(migrations = "../db/migrations")]
async fn faculty_dashboard_summary(pool: PgPool) {
    seed_campus(&pool).await;
    let app = common::build_test_app(pool);
    let token = login(app.clone(), "prof_x").await;

    let response = get_auth(app, "/api/v1/faculty/dashboard/", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["faculty_name"], "Test User");
    assert_eq!(json["department"], "Computer Science");
    assert_eq!(json["subjects_taught"], 1);
    assert_eq!(json["sections_assigned"], 1);
    assert_eq!(json["message"], "Welcome, Test User!");
}
