//! Audit log handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use tracker_core::types::pagination::PageResponse;
use tracker_entity::audit::AuditRecord;

use crate::dto::request::CreateAuditRecordRequest;
use crate::error::ApiError;
use crate::extractors::{AdminUser, ApiJson, ApiQuery, AuditPageParams};
use crate::state::AppState;

/// GET /rest/api/2/auditing/record
pub async fn list_records(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiQuery(params): ApiQuery<AuditPageParams>,
) -> Result<Json<PageResponse<AuditRecord>>, ApiError> {
    let page = state
        .auditing
        .records(
            params.from_id(),
            params.to_id(),
            params.filter.as_deref(),
            params.offset,
            params.limit,
        )
        .await?;
    Ok(Json(page))
}

/// POST /rest/api/2/auditing/record
pub async fn create_record(
    State(state): State<AppState>,
    admin: AdminUser,
    ApiJson(req): ApiJson<CreateAuditRecordRequest>,
) -> Result<(StatusCode, Json<AuditRecord>), ApiError> {
    req.validate()?;
    let record = state
        .auditing
        .store_for(&admin.context(), req.into_record_request())
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}
