//! Grants to the current assignee of each issue.

use async_trait::async_trait;

use tracker_core::query::{Query, fields};
use tracker_core::result::AppResult;
use tracker_entity::project::Project;
use tracker_entity::security::IssueSecurityLevel;
use tracker_entity::user::ApplicationUser;

use super::{SecurityType, project_clause, scoped_to_user, security_level_clause};

/// `assignee` security type.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssigneeSecurityType;

impl AssigneeSecurityType {
    /// Type key.
    pub const KEY: &'static str = "assignee";
}

#[async_trait]
impl SecurityType for AssigneeSecurityType {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn display_name(&self) -> &'static str {
        "Current Assignee"
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
        _project: &Project,
        _parameter: Option<&str>,
        _user: &ApplicationUser,
    ) -> AppResult<bool> {
        Ok(true)
    }

    fn project_query(
        &self,
        user: Option<&ApplicationUser>,
        project: &Project,
        _parameter: Option<&str>,
    ) -> Option<Query> {
        user.map(|u| scoped_to_user(project_clause(project), fields::ISSUE_ASSIGNEE, u))
    }

    fn security_level_query(
        &self,
        user: Option<&ApplicationUser>,
        _project: &Project,
        level: &IssueSecurityLevel,
        _parameter: Option<&str>,
    ) -> Option<Query> {
        user.map(|u| scoped_to_user(security_level_clause(level), fields::ISSUE_ASSIGNEE, u))
    }
}
