//! PostgreSQL implementations of the [`store`](crate::store) traits.

pub mod audit;
pub mod project;
pub mod role;
pub mod scheme;
pub mod security;
pub mod user;

use std::sync::Arc;

use sqlx::PgPool;

use crate::store::Stores;

pub use audit::AuditRecordRepository;
pub use project::ProjectRepository;
pub use role::ProjectRoleRepository;
pub use scheme::SchemeRepository;
pub use security::SecurityLevelRepository;
pub use user::UserRepository;

/// Build every store on top of one pool.
pub fn pg_stores(pool: PgPool) -> Stores {
    Stores {
        projects: Arc::new(ProjectRepository::new(pool.clone())),
        roles: Arc::new(ProjectRoleRepository::new(pool.clone())),
        schemes: Arc::new(SchemeRepository::new(pool.clone())),
        security_levels: Arc::new(SecurityLevelRepository::new(pool.clone())),
        directory: Arc::new(UserRepository::new(pool.clone())),
        audit: Arc::new(AuditRecordRepository::new(pool)),
    }
}
