//! Storing and querying audit records.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use tracker_core::error::AppError;
use tracker_core::result::AppResult;
use tracker_core::types::ErrorCollection;
use tracker_core::types::id::AuditRecordId;
use tracker_core::types::pagination::{PageRequest, PageResponse};
use tracker_database::store::{AuditQuery, AuditStore};
use tracker_entity::audit::{AuditRecord, RecordRequest};

use crate::context::RequestContext;

/// Audit log service.
#[derive(Clone)]
pub struct AuditingManager {
    store: Arc<dyn AuditStore>,
}

impl std::fmt::Debug for AuditingManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditingManager").finish_non_exhaustive()
    }
}

impl AuditingManager {
    /// Creates a new auditing manager.
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Persist a record, stamping it with the current time.
    pub async fn store(&self, request: RecordRequest) -> AppResult<AuditRecord> {
        if request.summary.trim().is_empty() {
            let mut errors = ErrorCollection::new();
            errors.add_error("summary", "audit.summary.required");
            return Err(AppError::from(errors));
        }

        let record = self.store.insert(request, Utc::now()).await?;
        debug!(
            id = %record.id,
            category = %record.category.as_str(),
            summary = %record.summary,
            "Stored audit record"
        );
        Ok(record)
    }

    /// Persist a record on behalf of the user in `ctx`. Author and remote
    /// address already present on the request are kept.
    pub async fn store_for(
        &self,
        ctx: &RequestContext,
        mut request: RecordRequest,
    ) -> AppResult<AuditRecord> {
        if request.author_key.is_none() {
            request.author_key = ctx.user_key().map(str::to_string);
        }
        if request.remote_address.is_none() {
            request.remote_address = ctx.remote_address.clone();
        }
        self.store(request).await
    }

    /// Records with ids in `from..=to` matching `filter`, newest first.
    pub async fn records(
        &self,
        from: Option<AuditRecordId>,
        to: Option<AuditRecordId>,
        filter: Option<&str>,
        offset: u32,
        limit: u32,
    ) -> AppResult<PageResponse<AuditRecord>> {
        let query = AuditQuery {
            from_id: from,
            to_id: to,
            filter: filter
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
            page: PageRequest::new(offset, limit),
        };
        self.store.find(&query).await
    }
}
