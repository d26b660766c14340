//! User and group lookups.

use async_trait::async_trait;

use tracker_core::result::AppResult;
use tracker_entity::user::ApplicationUser;

/// Read access to the user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up a user by login name.
    async fn user_by_name(&self, username: &str) -> AppResult<Option<ApplicationUser>>;

    /// Look up a user by key.
    async fn user_by_key(&self, key: &str) -> AppResult<Option<ApplicationUser>>;

    /// Whether a group with this name exists.
    async fn group_exists(&self, group: &str) -> AppResult<bool>;

    /// Whether `username` is a member of `group`.
    async fn is_user_in_group(&self, username: &str, group: &str) -> AppResult<bool>;

    /// Members of `group`, ordered by username.
    async fn group_members(&self, group: &str) -> AppResult<Vec<ApplicationUser>>;
}
