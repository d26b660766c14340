//! Audit record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracker_core::types::id::AuditRecordId;

use super::category::AuditingCategory;
use super::item::{AssociatedItem, ChangedValue};

/// An immutable audit log entry describing an administrative action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// Record ID, ascending with insertion order.
    pub id: AuditRecordId,
    /// When the action occurred.
    pub created: DateTime<Utc>,
    /// Administrative area.
    pub category: AuditingCategory,
    /// One-line summary (e.g. "Permission scheme created").
    pub summary: String,
    /// Where the record came from: empty for actions taken in the
    /// application, a plugin or integration key otherwise.
    pub event_source: String,
    /// Key of the user who performed the action; `None` for system actions.
    pub author_key: Option<String>,
    /// Remote address of the request that caused the action.
    pub remote_address: Option<String>,
    /// Primary object the action was performed on.
    pub object_item: Option<AssociatedItem>,
    /// Before/after values of changed fields.
    pub changed_values: Vec<ChangedValue>,
    /// Other objects affected by the action.
    pub associated_items: Vec<AssociatedItem>,
}

impl AuditRecord {
    /// Lower-cased text the audit log filter searches: summary, category,
    /// source, author, remote address, item names, and changed values.
    pub fn search_text(&self) -> String {
        let mut parts: Vec<&str> = vec![
            &self.summary,
            self.category.display_name(),
            &self.event_source,
        ];
        parts.extend(self.author_key.as_deref());
        parts.extend(self.remote_address.as_deref());
        for item in self.object_item.iter().chain(&self.associated_items) {
            parts.push(&item.object_name);
            parts.extend(item.parent_name.as_deref());
        }
        for value in &self.changed_values {
            parts.push(&value.name);
            parts.extend(value.from.as_deref());
            parts.extend(value.to.as_deref());
        }
        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase()
    }

    /// Case-insensitive text match over [`search_text`](Self::search_text).
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.search_text().contains(&filter.to_lowercase())
    }
}

/// Data for a new audit record. The id and timestamp are assigned on store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    /// Administrative area.
    pub category: AuditingCategory,
    /// One-line summary.
    pub summary: String,
    /// Source of the record; empty for in-application actions.
    #[serde(default)]
    pub event_source: String,
    /// Acting user key.
    #[serde(default)]
    pub author_key: Option<String>,
    /// Remote address.
    #[serde(default)]
    pub remote_address: Option<String>,
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

impl RecordRequest {
    /// Start a request with a category and summary.
    pub fn new(category: AuditingCategory, summary: impl Into<String>) -> Self {
        Self {
            category,
            summary: summary.into(),
            event_source: String::new(),
            author_key: None,
            remote_address: None,
            object_item: None,
            changed_values: Vec::new(),
            associated_items: Vec::new(),
        }
    }

    /// Set the primary object.
    pub fn for_object(mut self, item: AssociatedItem) -> Self {
        self.object_item = Some(item);
        self
    }

    /// Add associated objects.
    pub fn with_associated_items(mut self, items: impl IntoIterator<Item = AssociatedItem>) -> Self {
        self.associated_items.extend(items);
        self
    }

    /// Add changed values, keeping only those that actually changed.
    pub fn with_changed_values(mut self, values: impl IntoIterator<Item = ChangedValue>) -> Self {
        self.changed_values
            .extend(values.into_iter().filter(ChangedValue::is_change));
        self
    }

    /// Record the acting user and remote address.
    pub fn by(mut self, author_key: Option<String>, remote_address: Option<String>) -> Self {
        self.author_key = author_key;
        self.remote_address = remote_address;
        self
    }

    /// Materialize into a stored record.
    pub fn into_record(self, id: AuditRecordId, created: DateTime<Utc>) -> AuditRecord {
        AuditRecord {
            id,
            created,
            category: self.category,
            summary: self.summary,
            event_source: self.event_source,
            author_key: self.author_key,
            remote_address: self.remote_address,
            object_item: self.object_item,
            changed_values: self.changed_values,
            associated_items: self.associated_items,
        }
    }
}
