//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attendance_repo;
pub mod audit_repo;
pub mod dashboard_repo;
pub mod department_repo;
pub mod notification_repo;
pub mod section_repo;
pub mod semester_repo;
pub mod session_repo;
pub mod subject_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use audit_repo::AuditLogRepo;
pub use dashboard_repo::DashboardRepo;
pub use department_repo::DepartmentRepo;
pub use notification_repo::NotificationRepo;
pub use section_repo::SectionRepo;
pub use semester_repo::SemesterRepo;
pub use session_repo::SessionRepo;
pub use subject_repo::SubjectRepo;
pub use user_repo::UserRepo;
