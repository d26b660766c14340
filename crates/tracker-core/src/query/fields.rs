//! Names of indexed issue document fields used in permission queries.

/// Project id of the issue.
pub const PROJECT_ID: &str = "projid";

/// Issue security level id of the issue.
pub const ISSUE_SECURITY_LEVEL: &str = "issue_security_level";

/// Value stored in [`ISSUE_SECURITY_LEVEL`] when the issue has no level.
pub const NO_SECURITY_LEVEL: &str = "-1";

/// User key of the reporter.
pub const ISSUE_AUTHOR: &str = "issue_author";

/// User key of the assignee.
pub const ISSUE_ASSIGNEE: &str = "issue_assignee";
