//! A single grant inside a scheme.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::id::{SchemeEntityId, SchemeId};

/// Binds a security type (and its parameter) to an entity type id.
///
/// For permission schemes `entity_type_id` is the permission id; for
/// notification schemes it is the issue event type id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SchemeEntity {
    /// Entity ID.
    pub id: SchemeEntityId,
    /// Owning scheme.
    pub scheme_id: SchemeId,
    /// Security type key, e.g. `"group"` or `"projectrole"`.
    pub entity_type: String,
    /// Type parameter: group name, role id, username. `None` for parameterless types.
    pub parameter: Option<String>,
    /// Permission id or event type id this grant applies to.
    pub entity_type_id: i64,
}

impl SchemeEntity {
    /// Create a grant.
    pub fn new(
        id: SchemeEntityId,
        scheme_id: SchemeId,
        entity_type: impl Into<String>,
        parameter: Option<String>,
        entity_type_id: i64,
    ) -> Self {
        Self {
            id,
            scheme_id,
            entity_type: entity_type.into(),
            parameter,
            entity_type_id,
        }
    }
}
