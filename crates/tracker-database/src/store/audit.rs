//! Audit log persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use tracker_core::result::AppResult;
use tracker_core::types::id::AuditRecordId;
use tracker_core::types::pagination::{PageRequest, PageResponse};
use tracker_entity::audit::{AuditRecord, RecordRequest};

/// Criteria for listing audit records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditQuery {
    /// Lowest record id to include.
    pub from_id: Option<AuditRecordId>,
    /// Highest record id to include.
    pub to_id: Option<AuditRecordId>,
    /// Case-insensitive text that must occur in the record.
    pub filter: Option<String>,
    /// Page window.
    pub page: PageRequest,
}

impl AuditQuery {
    /// Whether `record` falls inside the id range and matches the filter.
    pub fn matches(&self, record: &AuditRecord) -> bool {
        self.from_id.is_none_or(|from| record.id >= from)
            && self.to_id.is_none_or(|to| record.id <= to)
            && self
                .filter
                .as_deref()
                .is_none_or(|f| record.matches_filter(f))
    }
}

/// Append-only audit record storage.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, request: RecordRequest, created: DateTime<Utc>)
    -> AppResult<AuditRecord>;

    /// Records matching `query`, newest first.
    async fn find(&self, query: &AuditQuery) -> AppResult<PageResponse<AuditRecord>>;
}
