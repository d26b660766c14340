//! Permission scheme lookups.

use async_trait::async_trait;

use tracker_core::result::AppResult;
use tracker_core::types::id::SchemeId;
use tracker_entity::project::Project;
use tracker_entity::scheme::{Scheme, SchemeEntity};

/// Read access to schemes and their grants.
#[async_trait]
pub trait SchemeStore: Send + Sync {
    /// Permission schemes associated with `project`.
    async fn permission_schemes(&self, project: &Project) -> AppResult<Vec<Scheme>>;

    /// Grants of `scheme` for one permission or event type id.
    async fn entities(&self, scheme: SchemeId, entity_type_id: i64)
    -> AppResult<Vec<SchemeEntity>>;
}
