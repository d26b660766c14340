//! Scheme entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use tracker_core::types::id::SchemeId;

/// Which family a scheme belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "scheme_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SchemeType {
    /// Grants project permissions.
    PermissionScheme,
    /// Routes issue events to recipients.
    NotificationScheme,
}

impl SchemeType {
    /// Return the type as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionScheme => "permission_scheme",
            Self::NotificationScheme => "notification_scheme",
        }
    }
}

impl fmt::Display for SchemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SchemeType {
    type Err = tracker_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "permission_scheme" => Ok(Self::PermissionScheme),
            "notification_scheme" => Ok(Self::NotificationScheme),
            _ => Err(tracker_core::AppError::validation(format!(
                "Invalid scheme type: '{s}'. Expected one of: permission_scheme, notification_scheme"
            ))),
        }
    }
}

/// A named bundle of grants that can be associated with projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Scheme {
    /// Scheme ID.
    pub id: SchemeId,
    /// Scheme name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Scheme family.
    pub scheme_type: SchemeType,
}
