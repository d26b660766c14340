//! Grants to members of a group, or to anyone when no group is named.

use std::sync::Arc;

use async_trait::async_trait;

use tracker_core::query::Query;
use tracker_core::result::AppResult;
use tracker_database::store::UserDirectory;
use tracker_entity::project::Project;
use tracker_entity::security::IssueSecurityLevel;
use tracker_entity::user::ApplicationUser;

use super::{SecurityType, non_blank, project_clause, security_level_clause};

/// `group` security type. An empty parameter means "anyone", including
/// anonymous callers.
#[derive(Clone)]
pub struct GroupSecurityType {
    directory: Arc<dyn UserDirectory>,
}

impl std::fmt::Debug for GroupSecurityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupSecurityType").finish()
    }
}

impl GroupSecurityType {
    /// Type key.
    pub const KEY: &'static str = "group";

    /// Create the type over a user directory.
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl SecurityType for GroupSecurityType {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn display_name(&self) -> &'static str {
        "Group"
    }

    async fn has_permission_anonymous(
        &self,
        _project: &Project,
        parameter: Option<&str>,
    ) -> AppResult<bool> {
        Ok(non_blank(parameter).is_none())
    }

    async fn has_permission(
        &self,
        _project: &Project,
        parameter: Option<&str>,
        user: &ApplicationUser,
    ) -> AppResult<bool> {
        match non_blank(parameter) {
            None => Ok(true),
            Some(group) => self.directory.is_user_in_group(&user.username, group).await,
        }
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
