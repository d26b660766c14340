//! Project repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use tracker_core::error::{AppError, ErrorKind};
use tracker_core::result::AppResult;
use tracker_core::types::id::ProjectId;
use tracker_entity::project::Project;

use crate::store::ProjectStore;

const SELECT_PROJECT: &str = "SELECT id, key, name, lead_user_key, permission_scheme_id, \
     issue_security_scheme_id FROM projects";

/// Repository for projects.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for ProjectRepository {
    async fn all_projects(&self) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(&format!("{SELECT_PROJECT} ORDER BY name ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))
    }

    async fn project_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>(&format!("{SELECT_PROJECT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }
}
