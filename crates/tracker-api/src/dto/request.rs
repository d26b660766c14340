//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use tracker_entity::audit::{AssociatedItem, AuditingCategory, ChangedValue, RecordRequest};

/// `GET /permission-query` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionQueryParams {
    /// Permission id or constant name (`10`, `BROWSE`).
    pub permission: String,
}

/// `POST /auditing/record` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuditRecordRequest {
    /// Administrative area.
    pub category: AuditingCategory,
    /// One-line summary.
    #[validate(length(min = 1, max = 255, message = "audit.summary.required"))]
    pub summary: String,
    /// Plugin or integration that produced the record.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub event_source: Option<String>,
    /// Primary object.
    #[serde(default)]
    pub object_item: Option<AssociatedItem>,
    /// Changed values.
    #[serde(default)]
    pub changed_values: Vec<ChangedValue>,
    /// Other affected objects.
    #[serde(default)]
    pub associated_items: Vec<AssociatedItem>,
}

impl CreateAuditRecordRequest {
    /// Convert into a record request. Author and remote address are taken
    /// from the caller, never from the body.
    pub fn into_record_request(self) -> RecordRequest {
        let mut request = RecordRequest::new(self.category, self.summary)
            .with_associated_items(self.associated_items)
            .with_changed_values(self.changed_values);
        request.object_item = self.object_item;
        request.event_source = self.event_source.unwrap_or_default();
        request
    }
}
