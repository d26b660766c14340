//! Project and project role lookups.

use async_trait::async_trait;

use tracker_core::result::AppResult;
use tracker_core::types::id::{ProjectId, ProjectRoleId};
use tracker_entity::project::{Project, ProjectRole};
use tracker_entity::user::ApplicationUser;

/// Read access to projects.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// All projects, ordered by name.
    async fn all_projects(&self) -> AppResult<Vec<Project>>;

    /// A single project.
    async fn project_by_id(&self, id: ProjectId) -> AppResult<Option<Project>>;
}

/// Read access to project roles and the actors placed in them.
#[async_trait]
pub trait ProjectRoleStore: Send + Sync {
    /// A role by id.
    async fn role_by_id(&self, id: ProjectRoleId) -> AppResult<Option<ProjectRole>>;

    /// Whether `user` is in `role` for `project`, directly or through a group.
    async fn is_user_in_role(
        &self,
        user: &ApplicationUser,
        role: ProjectRoleId,
        project: ProjectId,
    ) -> AppResult<bool>;

    /// Every user in `role` for `project`, with group actors expanded.
    async fn role_members(
        &self,
        role: ProjectRoleId,
        project: ProjectId,
    ) -> AppResult<Vec<ApplicationUser>>;
}
