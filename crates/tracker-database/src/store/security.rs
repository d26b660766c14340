//! Issue security scheme lookups.

use async_trait::async_trait;

use tracker_core::result::AppResult;
use tracker_core::types::id::{SchemeId, SecurityLevelId};
use tracker_entity::security::{IssueSecurityLevel, IssueSecurityLevelPermission};

/// Read access to issue security levels and their grants.
#[async_trait]
pub trait SecurityLevelStore: Send + Sync {
    /// A single level.
    async fn level(&self, id: SecurityLevelId) -> AppResult<Option<IssueSecurityLevel>>;

    /// All levels of a scheme.
    async fn levels_for_scheme(&self, scheme: SchemeId) -> AppResult<Vec<IssueSecurityLevel>>;

    /// Every grant in a scheme, across all its levels.
    async fn permissions_for_scheme(
        &self,
        scheme: SchemeId,
    ) -> AppResult<Vec<IssueSecurityLevelPermission>>;

    /// Grants for a single level.
    async fn permissions_for_level(
        &self,
        level: SecurityLevelId,
    ) -> AppResult<Vec<IssueSecurityLevelPermission>>;
}
