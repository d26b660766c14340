//! Grants to the reporter of each issue.

use async_trait::async_trait;

use tracker_core::query::{Query, fields};
use tracker_core::result::AppResult;
use tracker_entity::project::Project;
use tracker_entity::security::IssueSecurityLevel;
use tracker_entity::user::ApplicationUser;

use super::{SecurityType, project_clause, scoped_to_user, security_level_clause};

/// `reporter` security type.
///
/// At project level any logged-in user may hold the grant; the query then
/// narrows it to the issues they reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReporterSecurityType;

impl ReporterSecurityType {
    /// Type key.
    pub const KEY: &'static str = "reporter";
}

#[async_trait]
impl SecurityType for ReporterSecurityType {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn display_name(&self) -> &'static str {
        "Reporter"
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
        user.map(|u| scoped_to_user(project_clause(project), fields::ISSUE_AUTHOR, u))
    }

    fn security_level_query(
        &self,
        user: Option<&ApplicationUser>,
        _project: &Project,
        level: &IssueSecurityLevel,
        _parameter: Option<&str>,
    ) -> Option<Query> {
        user.map(|u| scoped_to_user(security_level_clause(level), fields::ISSUE_AUTHOR, u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{level, monkey, user};

    #[test]
    fn test_queries_are_scoped_to_reporter() {
        let ty = ReporterSecurityType;
        let fred = user("fred");
        let project = monkey();

        assert_eq!(
            ty.project_query(Some(&fred), &project, None).unwrap().to_string(),
            "+projid:10000 +issue_author:fred"
        );
        assert_eq!(
            ty.security_level_query(Some(&fred), &project, &level(20000, "Staff"), None)
                .unwrap()
                .to_string(),
            "+issue_security_level:20000 +issue_author:fred"
        );
        assert!(ty.project_query(None, &project, None).is_none());
    }
}
