//! Custom Axum extractors.

pub mod body;
pub mod pagination;
pub mod query_cache;
pub mod user;

pub use body::{ApiJson, ApiQuery};
pub use pagination::AuditPageParams;
pub use query_cache::QueryCache;
pub use user::{AdminUser, CurrentUser, USER_HEADER};
