//! Issue security scheme entities.

pub mod level;
pub mod permission;

pub use level::{IssueSecurityLevel, sort_by_name};
pub use permission::IssueSecurityLevelPermission;
