//! Security types: who a scheme grant applies to.
//!
//! A scheme entity names a security type by key plus an optional
//! parameter. The type answers two questions: does the grant apply to this
//! user in this project, and which index clause restricts a search to the
//! issues the grant exposes.

pub mod assignee;
pub mod group;
pub mod lead;
pub mod project_role;
pub mod registry;
pub mod reporter;
pub mod single_user;

use async_trait::async_trait;

use tracker_core::query::{BooleanQuery, Query, fields};
use tracker_core::result::AppResult;
use tracker_entity::project::Project;
use tracker_entity::security::IssueSecurityLevel;
use tracker_entity::user::ApplicationUser;

pub use assignee::AssigneeSecurityType;
pub use group::GroupSecurityType;
pub use lead::ProjectLeadSecurityType;
pub use project_role::ProjectRoleSecurityType;
pub use registry::SecurityTypeRegistry;
pub use reporter::ReporterSecurityType;
pub use single_user::SingleUserSecurityType;

/// Strategy evaluating one kind of scheme grant.
#[async_trait]
pub trait SecurityType: Send + Sync {
    /// Key stored in scheme entities, e.g. `"group"`.
    fn key(&self) -> &'static str;

    /// Human-readable name.
    fn display_name(&self) -> &'static str;

    /// Whether the grant applies to an anonymous caller.
    async fn has_permission_anonymous(
        &self,
        project: &Project,
        parameter: Option<&str>,
    ) -> AppResult<bool>;

    /// Whether the grant applies to `user`.
    async fn has_permission(
        &self,
        project: &Project,
        parameter: Option<&str>,
        user: &ApplicationUser,
    ) -> AppResult<bool>;

    /// Clause restricting a search to the project's issues this grant exposes.
    ///
    /// `None` means the grant contributes nothing to the query.
    fn project_query(
        &self,
        user: Option<&ApplicationUser>,
        project: &Project,
        parameter: Option<&str>,
    ) -> Option<Query>;

    /// Clause restricting a search to the level's issues this grant exposes.
    fn security_level_query(
        &self,
        user: Option<&ApplicationUser>,
        project: &Project,
        level: &IssueSecurityLevel,
        parameter: Option<&str>,
    ) -> Option<Query>;

    /// Dispatch to the anonymous or the user check.
    async fn has_permission_for(
        &self,
        project: &Project,
        parameter: Option<&str>,
        user: Option<&ApplicationUser>,
    ) -> AppResult<bool> {
        match user {
            Some(user) => self.has_permission(project, parameter, user).await,
            None => self.has_permission_anonymous(project, parameter).await,
        }
    }
}

/// `projid:<project id>`.
pub fn project_clause(project: &Project) -> Query {
    Query::term(fields::PROJECT_ID, project.id)
}

/// `issue_security_level:<level id>`.
pub fn security_level_clause(level: &IssueSecurityLevel) -> Query {
    Query::term(fields::ISSUE_SECURITY_LEVEL, level.id)
}

/// `+<scope> +<user_field>:<user key>`, used by the issue-role types.
pub(crate) fn scoped_to_user(scope: Query, user_field: &str, user: &ApplicationUser) -> Query {
    BooleanQuery::new()
        .must(scope)
        .must(Query::term(user_field, &user.key))
        .into()
}

/// Treat an empty or whitespace-only parameter as absent.
pub(crate) fn non_blank(parameter: Option<&str>) -> Option<&str> {
    parameter.map(str::trim).filter(|p| !p.is_empty())
}
