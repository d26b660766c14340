//! # tracker-auth
//!
//! Authorization for the issue tracker:
//!
//! - [`security_type`]: the strategies that decide whether a scheme grant
//!   (group, project role, single user, project lead, reporter, assignee)
//!   applies to a user, and that turn a grant into a search clause.
//! - [`permission`]: project permission checks over permission schemes.
//! - [`security_level`]: the issue security levels a user holds in a
//!   project, cached per project and user.

pub mod permission;
pub mod security_level;
pub mod security_type;

#[cfg(test)]
pub(crate) mod testing;

pub use permission::{PermissionChecker, PermissionManager};
pub use security_level::{IssueSecurityLevelResolver, SecurityLevelSource};
pub use security_type::{SecurityType, SecurityTypeRegistry};
