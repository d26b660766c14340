//! Grants that make an issue security level visible to users.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::id::{SchemeEntityId, SchemeId, SecurityLevelId};

/// One grant entry of an issue security scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct IssueSecurityLevelPermission {
    /// Entry ID.
    pub id: SchemeEntityId,
    /// Owning issue security scheme.
    pub scheme_id: SchemeId,
    /// Level this grant opens up.
    pub security_level_id: SecurityLevelId,
    /// Security type key.
    pub security_type: String,
    /// Type parameter.
    pub parameter: Option<String>,
}

impl IssueSecurityLevelPermission {
    /// Create a grant.
    pub fn new(
        id: SchemeEntityId,
        scheme_id: SchemeId,
        security_level_id: SecurityLevelId,
        security_type: impl Into<String>,
        parameter: Option<String>,
    ) -> Self {
        Self {
            id,
            scheme_id,
            security_level_id,
            security_type: security_type.into(),
            parameter,
        }
    }
}
