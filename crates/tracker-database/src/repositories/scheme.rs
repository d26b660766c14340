//! Scheme repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use tracker_core::error::{AppError, ErrorKind};
use tracker_core::result::AppResult;
use tracker_core::types::id::SchemeId;
use tracker_entity::project::Project;
use tracker_entity::scheme::{Scheme, SchemeEntity};

use crate::store::SchemeStore;

/// Repository for permission and notification schemes.
#[derive(Debug, Clone)]
pub struct SchemeRepository {
    pool: PgPool,
}

impl SchemeRepository {
    /// Create a new scheme repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemeStore for SchemeRepository {
    async fn permission_schemes(&self, project: &Project) -> AppResult<Vec<Scheme>> {
        let Some(scheme_id) = project.permission_scheme_id else {
            return Ok(Vec::new());
        };

        sqlx::query_as::<_, Scheme>(
            "SELECT id, name, description, scheme_type FROM schemes \
             WHERE id = $1 AND scheme_type = 'permission_scheme'",
        )
        .bind(scheme_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find permission schemes", e)
        })
    }

    async fn entities(
        &self,
        scheme: SchemeId,
        entity_type_id: i64,
    ) -> AppResult<Vec<SchemeEntity>> {
        sqlx::query_as::<_, SchemeEntity>(
            "SELECT id, scheme_id, entity_type, parameter, entity_type_id FROM scheme_entities \
             WHERE scheme_id = $1 AND entity_type_id = $2 ORDER BY id ASC",
        )
        .bind(scheme)
        .bind(entity_type_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find scheme entities", e)
        })
    }
}
