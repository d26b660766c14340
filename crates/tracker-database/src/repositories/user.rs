//! User directory repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use tracker_core::error::{AppError, ErrorKind};
use tracker_core::result::AppResult;
use tracker_entity::user::ApplicationUser;

use crate::store::UserDirectory;

const SELECT_USER: &str =
    "SELECT user_key AS key, username, display_name, email_address, active FROM users";

/// Repository for users, groups, and group memberships.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn user_by_name(&self, username: &str) -> AppResult<Option<ApplicationUser>> {
        sqlx::query_as::<_, ApplicationUser>(&format!(
            "{SELECT_USER} WHERE LOWER(username) = LOWER($1)"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by name", e))
    }

    async fn user_by_key(&self, key: &str) -> AppResult<Option<ApplicationUser>> {
        sqlx::query_as::<_, ApplicationUser>(&format!("{SELECT_USER} WHERE user_key = $1"))
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by key", e)
            })
    }

    async fn group_exists(&self, group: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM groups WHERE name = $1)")
            .bind(group)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }

    async fn is_user_in_group(&self, username: &str, group: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                 SELECT 1 FROM group_memberships m JOIN users u ON u.user_key = m.user_key \
                 WHERE m.group_name = $1 AND LOWER(u.username) = LOWER($2) \
             )",
        )
        .bind(group)
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check group membership", e)
        })
    }

    async fn group_members(&self, group: &str) -> AppResult<Vec<ApplicationUser>> {
        sqlx::query_as::<_, ApplicationUser>(
            "SELECT u.user_key AS key, u.username, u.display_name, u.email_address, u.active \
             FROM users u JOIN group_memberships m ON m.user_key = u.user_key \
             WHERE m.group_name = $1 ORDER BY u.username ASC",
        )
        .bind(group)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list group members", e))
    }
}
