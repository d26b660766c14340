//! Lookup traits consumed by the permission, search, mail, and audit layers.
//!
//! Each trait is object-safe and `Send + Sync` so it can be shared as an
//! `Arc<dyn ...>` across request handlers and swapped for in-memory fakes
//! in tests.

pub mod audit;
pub mod directory;
pub mod project;
pub mod scheme;
pub mod security;

use std::sync::Arc;

pub use audit::{AuditQuery, AuditStore};
pub use directory::UserDirectory;
pub use project::{ProjectRoleStore, ProjectStore};
pub use scheme::SchemeStore;
pub use security::SecurityLevelStore;

/// Every store the application needs, behind trait objects.
#[derive(Clone)]
pub struct Stores {
    /// Projects.
    pub projects: Arc<dyn ProjectStore>,
    /// Project roles and their actors.
    pub roles: Arc<dyn ProjectRoleStore>,
    /// Permission and notification schemes.
    pub schemes: Arc<dyn SchemeStore>,
    /// Issue security levels and their grants.
    pub security_levels: Arc<dyn SecurityLevelStore>,
    /// Users and groups.
    pub directory: Arc<dyn UserDirectory>,
    /// Audit log.
    pub audit: Arc<dyn AuditStore>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
