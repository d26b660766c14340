//! Grants to the project lead.

use async_trait::async_trait;

use tracker_core::query::Query;
use tracker_core::result::AppResult;
use tracker_entity::project::Project;
use tracker_entity::security::IssueSecurityLevel;
use tracker_entity::user::ApplicationUser;

use super::{SecurityType, project_clause, security_level_clause};

/// `lead` security type. Takes no parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectLeadSecurityType;

impl ProjectLeadSecurityType {
    /// Type key.
    pub const KEY: &'static str = "lead";
}

#[async_trait]
impl SecurityType for ProjectLeadSecurityType {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn display_name(&self) -> &'static str {
        "Project Lead"
    }

    async fn has_permission_anonymous(
        &self,
        _project: &Project,
        _parameter: Option<&str>,
    ) -> AppResult<bool> {
        Ok(false)
    }

    async fn has_permission(
        &self,
        project: &Project,
        _parameter: Option<&str>,
        user: &ApplicationUser,
    ) -> AppResult<bool> {
        Ok(project.is_lead(&user.key))
    }

    fn project_query(
        &self,
        _user: Option<&ApplicationUser>,
        project: &Project,
        _parameter: Option<&str>,
    ) -> Option<Query> {
        Some(project_clause(project))
    }

    fn security_level_query(
        &self,
        _user: Option<&ApplicationUser>,
        _project: &Project,
        level: &IssueSecurityLevel,
        _parameter: Option<&str>,
    ) -> Option<Query> {
        Some(security_level_clause(level))
    }
}
