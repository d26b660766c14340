//! Grants to users in a project role.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use tracker_core::query::Query;
use tracker_core::result::AppResult;
use tracker_core::types::id::ProjectRoleId;
use tracker_database::store::ProjectRoleStore;
use tracker_entity::project::Project;
use tracker_entity::security::IssueSecurityLevel;
use tracker_entity::user::ApplicationUser;

use super::{SecurityType, non_blank, project_clause, security_level_clause};

/// `projectrole` security type. The parameter is the role id.
#[derive(Clone)]
pub struct ProjectRoleSecurityType {
    roles: Arc<dyn ProjectRoleStore>,
}

impl std::fmt::Debug for ProjectRoleSecurityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectRoleSecurityType").finish()
    }
}

impl ProjectRoleSecurityType {
    /// Type key.
    pub const KEY: &'static str = "projectrole";

    /// Create the type over a role store.
    pub fn new(roles: Arc<dyn ProjectRoleStore>) -> Self {
        Self { roles }
    }
}

#[async_trait]
impl SecurityType for ProjectRoleSecurityType {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn display_name(&self) -> &'static str {
        "Project Role"
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
        parameter: Option<&str>,
        user: &ApplicationUser,
    ) -> AppResult<bool> {
        let Some(raw) = non_blank(parameter) else {
            return Ok(false);
        };
        let role: ProjectRoleId = match raw.parse() {
            Ok(role) => role,
            Err(_) => {
                warn!(parameter = raw, project = %project.key, "Ignoring grant with invalid project role id");
                return Ok(false);
            }
        };
        self.roles.is_user_in_role(user, role, project.id).await
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
