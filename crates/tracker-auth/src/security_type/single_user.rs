//! Grants to one named user.

use async_trait::async_trait;

use tracker_core::query::Query;
use tracker_core::result::AppResult;
use tracker_entity::project::Project;
use tracker_entity::security::IssueSecurityLevel;
use tracker_entity::user::ApplicationUser;

use super::{SecurityType, non_blank, project_clause, security_level_clause};

/// `user` security type. The parameter is a user key or username.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleUserSecurityType;

impl SingleUserSecurityType {
    /// Type key.
    pub const KEY: &'static str = "user";
}

#[async_trait]
impl SecurityType for SingleUserSecurityType {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn display_name(&self) -> &'static str {
        "Single User"
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
        parameter: Option<&str>,
        user: &ApplicationUser,
    ) -> AppResult<bool> {
        Ok(non_blank(parameter)
            .is_some_and(|p| p == user.key || p.eq_ignore_ascii_case(&user.username)))
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
