//! Query parameters for the audit record listing.

use serde::{Deserialize, Serialize};

use tracker_core::types::id::AuditRecordId;

/// `GET /auditing/record` parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditPageParams {
    /// Lowest record id to include.
    pub from: Option<i64>,
    /// Highest record id to include.
    pub to: Option<i64>,
    /// Text filter.
    pub filter: Option<String>,
    /// Records to skip (default: 0).
    #[serde(default)]
    pub offset: u32,
    /// Page size (default: 50, clamped to 1..=1000).
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    50
}

impl AuditPageParams {
    /// Lower id bound.
    pub fn from_id(&self) -> Option<AuditRecordId> {
        self.from.map(AuditRecordId::new)
    }

    /// Upper id bound.
    pub fn to_id(&self) -> Option<AuditRecordId> {
        self.to.map(AuditRecordId::new)
    }
}
