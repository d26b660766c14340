//! Audit record repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use tracker_core::error::{AppError, ErrorKind};
use tracker_core::result::AppResult;
use tracker_core::types::id::AuditRecordId;
use tracker_core::types::pagination::PageResponse;
use tracker_entity::audit::{AssociatedItem, AuditRecord, ChangedValue, RecordRequest};

use crate::store::{AuditQuery, AuditStore};

/// Row shape of `audit_records`; JSONB columns decode through [`Json`].
#[derive(Debug, FromRow)]
struct AuditRecordRow {
    id: AuditRecordId,
    created: DateTime<Utc>,
    category: String,
    summary: String,
    event_source: String,
    author_key: Option<String>,
    remote_address: Option<String>,
    object_item: Option<Json<AssociatedItem>>,
    changed_values: Json<Vec<ChangedValue>>,
    associated_items: Json<Vec<AssociatedItem>>,
}

impl TryFrom<AuditRecordRow> for AuditRecord {
    type Error = AppError;

    fn try_from(row: AuditRecordRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            created: row.created,
            category: row.category.parse().map_err(|e: AppError| {
                AppError::database(format!("Corrupt audit record {}: {}", row.id, e.message))
            })?,
            summary: row.summary,
            event_source: row.event_source,
            author_key: row.author_key,
            remote_address: row.remote_address,
            object_item: row.object_item.map(|Json(item)| item),
            changed_values: row.changed_values.0,
            associated_items: row.associated_items.0,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, created, category, summary, event_source, author_key, \
     remote_address, object_item, changed_values, associated_items FROM audit_records";

/// Repository for the audit log.
#[derive(Debug, Clone)]
pub struct AuditRecordRepository {
    pool: PgPool,
}

impl AuditRecordRepository {
    /// Create a new audit record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_conditions<'a>(builder: &mut QueryBuilder<'a, Postgres>, query: &'a AuditQuery) {
        builder.push(" WHERE TRUE");
        if let Some(from) = query.from_id {
            builder.push(" AND id >= ").push_bind(from);
        }
        if let Some(to) = query.to_id {
            builder.push(" AND id <= ").push_bind(to);
        }
        if let Some(filter) = query.filter.as_deref() {
            builder
                .push(" AND search_text LIKE '%' || ")
                .push_bind(escape_like(&filter.to_lowercase()))
                .push(" || '%'");
        }
    }
}

/// Escape `%`, `_`, and `\` so the filter matches literally.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl AuditStore for AuditRecordRepository {
    async fn insert(
        &self,
        request: RecordRequest,
        created: DateTime<Utc>,
    ) -> AppResult<AuditRecord> {
        // The id is assigned by the sequence; build the record first so the
        // search text covers exactly what is stored.
        let draft = request.into_record(AuditRecordId::new(0), created);
        let search_text = draft.search_text();

        let id: AuditRecordId = sqlx::query_scalar(
            "INSERT INTO audit_records (created, category, summary, event_source, author_key, \
             remote_address, object_item, changed_values, associated_items, search_text) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
        )
        .bind(draft.created)
        .bind(draft.category.as_str())
        .bind(&draft.summary)
        .bind(&draft.event_source)
        .bind(&draft.author_key)
        .bind(&draft.remote_address)
        .bind(draft.object_item.as_ref().map(Json))
        .bind(Json(&draft.changed_values))
        .bind(Json(&draft.associated_items))
        .bind(search_text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store audit record", e))?;

        Ok(AuditRecord { id, ..draft })
    }

    async fn find(&self, query: &AuditQuery) -> AppResult<PageResponse<AuditRecord>> {
        let page = query.page.normalized();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM audit_records");
        Self::push_conditions(&mut count, query);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count audit records", e)
            })?;

        let mut select = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        Self::push_conditions(&mut select, query);
        select
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(i64::from(page.limit))
            .push(" OFFSET ")
            .push_bind(i64::from(page.offset));

        let rows = select
            .build_query_as::<AuditRecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search audit records", e)
            })?;

        let records = rows
            .into_iter()
            .map(AuditRecord::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PageResponse::new(records, &page, total.max(0) as u64))
    }
}
