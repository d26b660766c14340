//! Bulk mail handler.

use axum::Json;
use axum::extract::State;

use tracker_mail::{BulkMailReport, BulkMailRequest};

use crate::error::ApiError;
use crate::extractors::{AdminUser, ApiJson};
use crate::state::AppState;

/// POST /rest/api/2/admin/bulk-mail
pub async fn send_bulk_mail(
    State(state): State<AppState>,
    admin: AdminUser,
    ApiJson(req): ApiJson<BulkMailRequest>,
) -> Result<Json<BulkMailReport>, ApiError> {
    let report = state.bulk_mail.send(&admin.user, &req).await?;
    Ok(Json(report))
}
