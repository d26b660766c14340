//! Project permission checks over permission schemes.

pub mod manager;

use async_trait::async_trait;

use tracker_core::result::AppResult;
use tracker_entity::permission::ProjectPermission;
use tracker_entity::project::Project;
use tracker_entity::user::ApplicationUser;

pub use manager::PermissionManager;

/// Answers which projects a user holds a permission in.
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    /// Projects in which `user` (or an anonymous caller) holds `permission`.
    async fn projects_with_permission(
        &self,
        permission: ProjectPermission,
        user: Option<&ApplicationUser>,
    ) -> AppResult<Vec<Project>>;

    /// Whether `user` holds `permission` in `project`.
    async fn has_project_permission(
        &self,
        permission: ProjectPermission,
        project: &Project,
        user: Option<&ApplicationUser>,
    ) -> AppResult<bool>;
}
