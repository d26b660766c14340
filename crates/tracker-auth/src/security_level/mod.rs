//! Issue security levels held by users.

pub mod resolver;

use async_trait::async_trait;

use tracker_core::result::AppResult;
use tracker_entity::project::Project;
use tracker_entity::security::IssueSecurityLevel;
use tracker_entity::user::ApplicationUser;

pub use resolver::IssueSecurityLevelResolver;

/// Answers which issue security levels a user may see in a project.
#[async_trait]
pub trait SecurityLevelSource: Send + Sync {
    /// Levels `user` holds in `project`, deduplicated and ordered by name
    /// with unnamed levels last.
    async fn users_security_levels(
        &self,
        project: &Project,
        user: Option<&ApplicationUser>,
    ) -> AppResult<Vec<IssueSecurityLevel>>;
}
