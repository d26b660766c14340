//! Issue security level repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use tracker_core::error::{AppError, ErrorKind};
use tracker_core::result::AppResult;
use tracker_core::types::id::{SchemeId, SecurityLevelId};
use tracker_entity::security::{IssueSecurityLevel, IssueSecurityLevelPermission};

use crate::store::SecurityLevelStore;

const SELECT_LEVEL_PERMISSION: &str = "SELECT id, scheme_id, security_level_id, security_type, \
     parameter FROM issue_security_level_permissions";

/// Repository for issue security levels and their grants.
#[derive(Debug, Clone)]
pub struct SecurityLevelRepository {
    pool: PgPool,
}

impl SecurityLevelRepository {
    /// Create a new security level repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SecurityLevelStore for SecurityLevelRepository {
    async fn level(&self, id: SecurityLevelId) -> AppResult<Option<IssueSecurityLevel>> {
        sqlx::query_as::<_, IssueSecurityLevel>(
            "SELECT id, name, description, scheme_id FROM issue_security_levels WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find security level", e))
    }

    async fn levels_for_scheme(&self, scheme: SchemeId) -> AppResult<Vec<IssueSecurityLevel>> {
        sqlx::query_as::<_, IssueSecurityLevel>(
            "SELECT id, name, description, scheme_id FROM issue_security_levels \
             WHERE scheme_id = $1 ORDER BY name ASC NULLS LAST",
        )
        .bind(scheme)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list security levels", e)
        })
    }

    async fn permissions_for_scheme(
        &self,
        scheme: SchemeId,
    ) -> AppResult<Vec<IssueSecurityLevelPermission>> {
        sqlx::query_as::<_, IssueSecurityLevelPermission>(&format!(
            "{SELECT_LEVEL_PERMISSION} WHERE scheme_id = $1 ORDER BY id ASC"
        ))
        .bind(scheme)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to list security level permissions",
                e,
            )
        })
    }

    async fn permissions_for_level(
        &self,
        level: SecurityLevelId,
    ) -> AppResult<Vec<IssueSecurityLevelPermission>> {
        sqlx::query_as::<_, IssueSecurityLevelPermission>(&format!(
            "{SELECT_LEVEL_PERMISSION} WHERE security_level_id = $1 ORDER BY id ASC"
        ))
        .bind(level)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to list security level permissions",
                e,
            )
        })
    }
}
