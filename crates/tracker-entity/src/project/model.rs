//! Project entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::id::{ProjectId, SchemeId};

/// A project: the unit permission and issue security schemes attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Project ID.
    pub id: ProjectId,
    /// Short upper-case key (e.g. `"MKY"`).
    pub key: String,
    /// Display name.
    pub name: String,
    /// Key of the project lead.
    pub lead_user_key: Option<String>,
    /// Permission scheme associated with the project.
    pub permission_scheme_id: Option<SchemeId>,
    /// Issue security scheme associated with the project.
    pub issue_security_scheme_id: Option<SchemeId>,
}

impl Project {
    /// Create a project without any scheme associations.
    pub fn new(id: ProjectId, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            name: name.into(),
            lead_user_key: None,
            permission_scheme_id: None,
            issue_security_scheme_id: None,
        }
    }

    /// Whether `user_key` is the project lead.
    pub fn is_lead(&self, user_key: &str) -> bool {
        self.lead_user_key.as_deref() == Some(user_key)
    }
}
