//! Entity models: one module per table, each holding the `FromRow` row
//! struct plus the create/update DTOs used by repositories and handlers.

pub mod attendance;
pub mod audit;
pub mod dashboard;
pub mod department;
pub mod notification;
pub mod section;
pub mod semester;
pub mod session;
pub mod subject;
pub mod user;
