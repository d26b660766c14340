//! Audit log services.

pub mod handler;
pub mod manager;

pub use handler::AuditEventHandler;
pub use manager::AuditingManager;
