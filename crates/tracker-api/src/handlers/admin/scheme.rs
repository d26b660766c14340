//! Scheme administration event intake.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use tracker_core::events::scheme::SchemeEvent;
use tracker_entity::audit::AuditRecord;

use crate::error::ApiError;
use crate::extractors::{AdminUser, ApiJson};
use crate::state::AppState;

/// POST /rest/api/2/admin/scheme-event
///
/// Audits a scheme change made by an administration tool and drops cached
/// security levels when the change can affect them.
pub async fn record_scheme_event(
    State(state): State<AppState>,
    admin: AdminUser,
    ApiJson(event): ApiJson<SchemeEvent>,
) -> Result<(StatusCode, Json<AuditRecord>), ApiError> {
    let record = state.audit_events.handle(&admin.context(), &event).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
