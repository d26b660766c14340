//! Audit record categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The administrative area an audit record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditingCategory {
    /// Permission and issue security schemes.
    Permissions,
    /// Users.
    UserManagement,
    /// Groups and memberships.
    GroupManagement,
    /// Projects, versions, components.
    Projects,
    /// Notification schemes.
    Notifications,
    /// Workflows and workflow schemes.
    Workflows,
    /// Custom fields and field configurations.
    Fields,
    /// System configuration.
    System,
}

impl AuditingCategory {
    /// Stored identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permissions => "PERMISSIONS",
            Self::UserManagement => "USER_MANAGEMENT",
            Self::GroupManagement => "GROUP_MANAGEMENT",
            Self::Projects => "PROJECTS",
            Self::Notifications => "NOTIFICATIONS",
            Self::Workflows => "WORKFLOWS",
            Self::Fields => "FIELDS",
            Self::System => "SYSTEM",
        }
    }

    /// Human-readable name, matched by the audit log text filter.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Permissions => "permissions",
            Self::UserManagement => "user management",
            Self::GroupManagement => "group management",
            Self::Projects => "projects",
            Self::Notifications => "notifications",
            Self::Workflows => "workflows",
            Self::Fields => "fields",
            Self::System => "system",
        }
    }
}

impl fmt::Display for AuditingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuditingCategory {
    type Err = tracker_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace([' ', '-'], "_").as_str() {
            "PERMISSIONS" => Ok(Self::Permissions),
            "USER_MANAGEMENT" => Ok(Self::UserManagement),
            "GROUP_MANAGEMENT" => Ok(Self::GroupManagement),
            "PROJECTS" => Ok(Self::Projects),
            "NOTIFICATIONS" => Ok(Self::Notifications),
            "WORKFLOWS" => Ok(Self::Workflows),
            "FIELDS" => Ok(Self::Fields),
            "SYSTEM" => Ok(Self::System),
            _ => Err(tracker_core::AppError::validation(format!(
                "Invalid auditing category: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_display_and_stored_forms() {
        assert_eq!(
            "USER_MANAGEMENT".parse::<AuditingCategory>().unwrap(),
            AuditingCategory::UserManagement
        );
        assert_eq!(
            "group management".parse::<AuditingCategory>().unwrap(),
            AuditingCategory::GroupManagement
        );
        assert!("billing".parse::<AuditingCategory>().is_err());
    }

    #[test]
    fn test_serde_uses_stored_form() {
        let json = serde_json::to_string(&AuditingCategory::Permissions).unwrap();
        assert_eq!(json, "\"PERMISSIONS\"");
    }
}
