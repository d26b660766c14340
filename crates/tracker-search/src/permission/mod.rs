//! Permission query construction and per-request reuse.

pub mod cache;
pub mod factory;

pub use cache::RequestQueryCache;
pub use factory::PermissionQueryFactory;
