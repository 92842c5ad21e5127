//! Integration tests for entity CRUD operations.
//!
//! Exercises the repository layer against a real database:
//! - Create the full hierarchy (department -> semester -> section -> subject)
//! - Foreign-key delete behaviour (SET NULL on users, CASCADE on children)
//! - Unique constraint violations
//! - Update and list operations

use campus_core::roles::Role;
use campus_db::models::department::{CreateDepartment, UpdateDepartment};
use campus_db::models::section::CreateSection;
use campus_db::models::semester::CreateSemester;
use campus_db::models::subject::CreateSubject;
use campus_db::models::user::{CreateUser, UpdateUser, UserListFilter};
use campus_db::repositories::{
    DepartmentRepo, SectionRepo, SemesterRepo, SubjectRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_department(name: &str, code: &str) -> CreateDepartment {
    CreateDepartment {
        name: name.to_string(),
        code: code.to_string(),
        hod_id: None,
    }
}

fn new_semester(department_id: i64, number: i32) -> CreateSemester {
    CreateSemester {
        number,
        academic_year: "2024-25".to_string(),
        department_id,
    }
}

fn new_section(semester_id: i64, name: &str) -> CreateSection {
    CreateSection {
        name: name.to_string(),
        semester_id,
        faculty_incharge_id: None,
    }
}

fn new_subject(semester_id: i64, department_id: i64, code: &str) -> CreateSubject {
    CreateSubject {
        name: format!("Subject {code}"),
        code: code.to_string(),
        credits: 4,
        semester_id,
        department_id,
        faculty_assigned_id: None,
    }
}

fn new_user(username: &str, role: Role, department_id: Option<i64>) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@campus.test"),
        password_hash: "x".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        role,
        department_id,
        semester_id: None,
        section_id: None,
    }
}

// ---------------------------------------------------------------------------
// Test: Full hierarchy creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_full_hierarchy(pool: PgPool) {
    let dept = DepartmentRepo::create(&pool, &new_department("Computer Science", "CS"))
        .await
        .unwrap();
    assert_eq!(dept.code, "CS");
    assert!(dept.hod_id.is_none());

    let semester = SemesterRepo::create(&pool, &new_semester(dept.id, 1))
        .await
        .unwrap();
    assert_eq!(semester.number, 1);
    assert!(semester.is_active);

    let section = SectionRepo::create(&pool, &new_section(semester.id, "A"))
        .await
        .unwrap();
    assert_eq!(section.name, "A");
    assert_eq!(section.student_count, 0);

    let subject = SubjectRepo::create(&pool, &new_subject(semester.id, dept.id, "CS101"))
        .await
        .unwrap();
    assert_eq!(subject.code, "CS101");
    assert_eq!(subject.credits, 4);

    let student = UserRepo::create(
        &pool,
        &CreateUser {
            semester_id: Some(semester.id),
            section_id: Some(section.id),
            ..new_user("alice", Role::Student, Some(dept.id))
        },
    )
    .await
    .unwrap();
    assert_eq!(student.role, Role::Student);
    assert_eq!(student.section_id, Some(section.id));
}

// ---------------------------------------------------------------------------
// Test: Deleting a department detaches users, cascades children
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_department_detaches_users(pool: PgPool) {
    let dept = DepartmentRepo::create(&pool, &new_department("Physics", "PHY"))
        .await
        .unwrap();
    let semester = SemesterRepo::create(&pool, &new_semester(dept.id, 2))
        .await
        .unwrap();
    let subject = SubjectRepo::create(&pool, &new_subject(semester.id, dept.id, "PHY201"))
        .await
        .unwrap();
    let user = UserRepo::create(&pool, &new_user("bob", Role::Faculty, Some(dept.id)))
        .await
        .unwrap();
    assert_eq!(user.department_id, Some(dept.id));

    let deleted = DepartmentRepo::delete(&pool, dept.id).await.unwrap();
    assert!(deleted);

    // The user survives with department_id cleared.
    let survivor = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(survivor.department_id, None);

    // Semester and subject cascade away.
    assert!(SemesterRepo::find_by_id(&pool, semester.id)
        .await
        .unwrap()
        .is_none());
    assert!(SubjectRepo::find_by_id(&pool, subject.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: Deleting the HOD user leaves the department headless
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_hod_clears_department_reference(pool: PgPool) {
    let dept = DepartmentRepo::create(&pool, &new_department("Maths", "MA"))
        .await
        .unwrap();
    let hod = UserRepo::create(&pool, &new_user("carol", Role::Hod, Some(dept.id)))
        .await
        .unwrap();
    DepartmentRepo::update(
        &pool,
        dept.id,
        &UpdateDepartment {
            hod_id: Some(hod.id),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert!(UserRepo::delete(&pool, hod.id).await.unwrap());

    let dept = DepartmentRepo::find_by_id(&pool, dept.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(dept.hod_id, None);
}

// ---------------------------------------------------------------------------
// Test: Unique constraint violations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_username_rejected(pool: PgPool) {
    UserRepo::create(&pool, &new_user("dave", Role::Student, None))
        .await
        .unwrap();
    let result = UserRepo::create(&pool, &new_user("dave", Role::Student, None)).await;
    assert!(result.is_err(), "Duplicate username should fail");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_section_name_in_semester_rejected(pool: PgPool) {
    let dept = DepartmentRepo::create(&pool, &new_department("Chemistry", "CH"))
        .await
        .unwrap();
    let semester = SemesterRepo::create(&pool, &new_semester(dept.id, 3))
        .await
        .unwrap();

    SectionRepo::create(&pool, &new_section(semester.id, "A"))
        .await
        .unwrap();
    let result = SectionRepo::create(&pool, &new_section(semester.id, "A")).await;
    assert!(result.is_err(), "Duplicate section name should fail");

    // Same name under a different semester is fine.
    let other = SemesterRepo::create(&pool, &new_semester(dept.id, 4))
        .await
        .unwrap();
    assert!(SectionRepo::create(&pool, &new_section(other.id, "A"))
        .await
        .is_ok());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_semester_number_out_of_range_rejected(pool: PgPool) {
    let dept = DepartmentRepo::create(&pool, &new_department("Biology", "BIO"))
        .await
        .unwrap();
    assert!(SemesterRepo::create(&pool, &new_semester(dept.id, 9))
        .await
        .is_err());
    assert!(SemesterRepo::create(&pool, &new_semester(dept.id, 0))
        .await
        .is_err());
}

// ---------------------------------------------------------------------------
// Test: Partial update touches only provided fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_user_update(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("erin", Role::Student, None))
        .await
        .unwrap();

    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            first_name: Some("Erin".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.first_name, "Erin");
    assert_eq!(updated.username, "erin");
    assert_eq!(updated.role, Role::Student);

    // Unknown id yields None, not an error.
    let missing = UserRepo::update(&pool, 999_999, &UpdateUser::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Test: Filtered user listing with resolved context
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_filtered_with_context(pool: PgPool) {
    let dept = DepartmentRepo::create(&pool, &new_department("History", "HIS"))
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user("frank", Role::Faculty, Some(dept.id)))
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user("grace", Role::Student, Some(dept.id)))
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user("heidi", Role::Student, None))
        .await
        .unwrap();

    let students = UserRepo::list_with_context(
        &pool,
        &UserListFilter {
            role: Some(Role::Student),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(students.len(), 2);

    let in_dept = UserRepo::list_with_context(
        &pool,
        &UserListFilter {
            role: Some(Role::Student),
            department_id: Some(dept.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(in_dept.len(), 1);
    assert_eq!(in_dept[0].username, "grace");
    assert_eq!(in_dept[0].department_name.as_deref(), Some("History"));
}

// ---------------------------------------------------------------------------
// Test: Denormalized section student_count refresh
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_student_count(pool: PgPool) {
    let dept = DepartmentRepo::create(&pool, &new_department("Economics", "ECO"))
        .await
        .unwrap();
    let semester = SemesterRepo::create(&pool, &new_semester(dept.id, 1))
        .await
        .unwrap();
    let section = SectionRepo::create(&pool, &new_section(semester.id, "B"))
        .await
        .unwrap();

    for name in ["ivan", "judy"] {
        UserRepo::create(
            &pool,
            &CreateUser {
                section_id: Some(section.id),
                ..new_user(name, Role::Student, Some(dept.id))
            },
        )
        .await
        .unwrap();
    }
    // Faculty in the section must not be counted.
    UserRepo::create(
        &pool,
        &CreateUser {
            section_id: Some(section.id),
            ..new_user("karl", Role::Faculty, Some(dept.id))
        },
    )
    .await
    .unwrap();

    SectionRepo::refresh_student_count(&pool, section.id)
        .await
        .unwrap();

    let section = SectionRepo::find_by_id(&pool, section.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(section.student_count, 2);
}
