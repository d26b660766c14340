//! Issue security level entity.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::id::{SchemeId, SecurityLevelId};

/// A visibility tier within an issue security scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct IssueSecurityLevel {
    /// Level ID.
    pub id: SecurityLevelId,
    /// Level name.
    pub name: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Owning issue security scheme.
    pub scheme_id: SchemeId,
}

impl IssueSecurityLevel {
    /// Create a level.
    pub fn new(id: SecurityLevelId, scheme_id: SchemeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            description: None,
            scheme_id,
        }
    }
}

/// Sort levels by name; levels without a name go last.
pub fn sort_by_name(levels: &mut [IssueSecurityLevel]) {
    levels.sort_by(|a, b| match (&a.name, &b.name) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
