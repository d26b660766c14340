//! Project role entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::id::ProjectRoleId;

/// A role users and groups can be placed in per project (e.g. "Developers").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProjectRole {
    /// Role ID.
    pub id: ProjectRoleId,
    /// Role name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}
