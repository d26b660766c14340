//! Permission ids.
//!
//! Permissions are persisted as integers inside scheme entities. The named
//! constants below are the built-in set; plugins may store other ids, so the
//! type is an open newtype rather than a closed enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A permission id as stored in permission scheme entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectPermission(pub i64);

macro_rules! permissions {
    ($($(#[$meta:meta])* $name:ident = $id:expr;)*) => {
        impl ProjectPermission {
            $(
                $(#[$meta])*
                pub const $name: Self = Self($id);
            )*

            /// Every built-in permission.
            pub const ALL: &'static [Self] = &[$(Self::$name),*];

            /// Constant name of a built-in permission.
            pub fn name(&self) -> Option<&'static str> {
                match self.0 {
                    $($id => Some(stringify!($name)),)*
                    _ => None,
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($name) => Some(Self::$name),)*
                    _ => None,
                }
            }
        }
    };
}

permissions! {
    /// Global administration.
    ADMINISTER = 0;
    /// Log in to the tracker.
    USE = 1;
    /// Browse projects and the issues within them.
    BROWSE = 10;
    /// Create issues.
    CREATE_ISSUE = 11;
    /// Edit issues.
    EDIT_ISSUE = 12;
    /// Assign issues to other people.
    ASSIGN = 13;
    /// Resolve and reopen issues.
    RESOLVE = 14;
    /// Comment on issues.
    COMMENT = 15;
    /// Delete issues.
    DELETE = 16;
    /// Be assigned issues.
    ASSIGNABLE_USER = 17;
    /// Close issues.
    CLOSE = 18;
    /// Attach files.
    CREATE_ATTACHMENT = 19;
    /// Log work.
    WORK = 20;
    /// Link issues.
    LINK = 21;
    /// Share filters and dashboards.
    CREATE_SHARED_OBJECTS = 22;
    /// Administer a project.
    PROJECT_ADMIN = 23;
    /// Manage group filter subscriptions.
    MANAGE_GROUP_FILTER_SUBSCRIPTIONS = 24;
    /// Move issues between projects.
    MOVE = 25;
    /// Set the security level on issues.
    SET_ISSUE_SECURITY = 26;
    /// Browse the user list.
    USER_PICKER = 27;
    /// Set due dates.
    SCHEDULE = 28;
    /// View version control information.
    VIEW_VERSION_CONTROL = 29;
    /// Change the reporter.
    MODIFY_REPORTER = 30;
    /// View voters and watchers.
    VIEW_VOTERS_AND_WATCHERS = 31;
    /// Manage the watcher list.
    MANAGE_WATCHER_LIST = 32;
    /// Perform bulk operations.
    BULK_CHANGE = 33;
    /// Edit any comment.
    COMMENT_EDIT_ALL = 34;
    /// Edit own comments.
    COMMENT_EDIT_OWN = 35;
    /// Delete any comment.
    COMMENT_DELETE_ALL = 36;
    /// Delete own comments.
    COMMENT_DELETE_OWN = 37;
    /// Delete any attachment.
    ATTACHMENT_DELETE_ALL = 38;
    /// Delete own attachments.
    ATTACHMENT_DELETE_OWN = 39;
    /// Edit own work logs.
    WORKLOG_EDIT_OWN = 40;
    /// Edit any work log.
    WORKLOG_EDIT_ALL = 41;
    /// Delete own work logs.
    WORKLOG_DELETE_OWN = 42;
    /// Delete any work log.
    WORKLOG_DELETE_ALL = 43;
    /// System administration.
    SYSTEM_ADMIN = 44;
    /// View read-only workflows.
    VIEW_WORKFLOW_READONLY = 45;
    /// Transition issues.
    TRANSITION_ISSUE = 46;
}

impl ProjectPermission {
    /// Create a permission from a raw id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the raw id.
    pub const fn id(self) -> i64 {
        self.0
    }

    /// Whether this is one of the global (not project-scoped) permissions.
    pub fn is_global(&self) -> bool {
        matches!(
            *self,
            Self::ADMINISTER
                | Self::USE
                | Self::CREATE_SHARED_OBJECTS
                | Self::MANAGE_GROUP_FILTER_SUBSCRIPTIONS
                | Self::USER_PICKER
                | Self::BULK_CHANGE
                | Self::SYSTEM_ADMIN
        )
    }
}

impl fmt::Display for ProjectPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for ProjectPermission {
    type Err = tracker_core::AppError;

    /// Accepts either the numeric id or the constant name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i64>() {
            return Ok(Self(id));
        }
        Self::from_name(&s.to_uppercase()).ok_or_else(|| {
            tracker_core::AppError::validation(format!("Unknown permission: '{s}'"))
        })
    }
}

impl From<i64> for ProjectPermission {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
