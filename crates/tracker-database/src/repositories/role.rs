//! Project role repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use tracker_core::error::{AppError, ErrorKind};
use tracker_core::result::AppResult;
use tracker_core::types::id::{ProjectId, ProjectRoleId};
use tracker_entity::project::ProjectRole;
use tracker_entity::user::ApplicationUser;

use crate::store::ProjectRoleStore;

/// Repository for project roles and role actors.
#[derive(Debug, Clone)]
pub struct ProjectRoleRepository {
    pool: PgPool,
}

impl ProjectRoleRepository {
    /// Create a new project role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRoleStore for ProjectRoleRepository {
    async fn role_by_id(&self, id: ProjectRoleId) -> AppResult<Option<ProjectRole>> {
        sqlx::query_as::<_, ProjectRole>(
            "SELECT id, name, description FROM project_roles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project role", e))
    }

    async fn is_user_in_role(
        &self,
        user: &ApplicationUser,
        role: ProjectRoleId,
        project: ProjectId,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                 SELECT 1 FROM project_role_actors a \
                 WHERE a.project_id = $1 AND a.role_id = $2 AND ( \
                     (a.actor_type = 'user' AND a.parameter = $3) \
                     OR (a.actor_type = 'group' AND EXISTS ( \
                         SELECT 1 FROM group_memberships m \
                         WHERE m.group_name = a.parameter AND m.user_key = $3)) \
                 ) \
             )",
        )
        .bind(project)
        .bind(role)
        .bind(&user.key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check role membership", e)
        })
    }

    async fn role_members(
        &self,
        role: ProjectRoleId,
        project: ProjectId,
    ) -> AppResult<Vec<ApplicationUser>> {
        sqlx::query_as::<_, ApplicationUser>(
            "SELECT DISTINCT u.user_key AS key, u.username, u.display_name, u.email_address, u.active \
             FROM users u \
             JOIN project_role_actors a ON a.project_id = $1 AND a.role_id = $2 \
             LEFT JOIN group_memberships m \
                 ON a.actor_type = 'group' AND m.group_name = a.parameter \
             WHERE (a.actor_type = 'user' AND u.user_key = a.parameter) \
                OR (a.actor_type = 'group' AND u.user_key = m.user_key) \
             ORDER BY u.username ASC",
        )
        .bind(project)
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list role members", e))
    }
}
