//! Objects referenced by audit records.

use serde::{Deserialize, Serialize};

/// Kind of object an [`AssociatedItem`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssociatedItemType {
    User,
    Project,
    Group,
    Scheme,
    Permissions,
    IssueSecurityLevel,
    NotificationScheme,
    ProjectRole,
    Workflow,
    CustomField,
    Version,
    ProjectComponent,
}

/// A typed reference to a domain object affected by an audited action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedItem {
    /// Name of the object at the time of the action.
    pub object_name: String,
    /// Identifier of the object, as a string.
    pub object_id: Option<String>,
    /// Name of the containing object (e.g. the scheme of a level).
    pub parent_name: Option<String>,
    /// Identifier of the containing object.
    pub parent_id: Option<String>,
    /// Object kind.
    #[serde(rename = "typeName")]
    pub item_type: AssociatedItemType,
}

impl AssociatedItem {
    /// Reference an object with no parent.
    pub fn new(
        item_type: AssociatedItemType,
        object_name: impl Into<String>,
        object_id: impl ToString,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            object_id: Some(object_id.to_string()),
            parent_name: None,
            parent_id: None,
            item_type,
        }
    }

    /// Attach the containing object.
    pub fn with_parent(mut self, parent_name: impl Into<String>, parent_id: impl ToString) -> Self {
        self.parent_name = Some(parent_name.into());
        self.parent_id = Some(parent_id.to_string());
        self
    }
}

/// One field's value before and after an audited change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedValue {
    /// Field name.
    pub name: String,
    /// Value before the change.
    pub from: Option<String>,
    /// Value after the change.
    pub to: Option<String>,
}

impl ChangedValue {
    /// Create a changed value.
    pub fn new(name: impl Into<String>, from: Option<String>, to: Option<String>) -> Self {
        Self {
            name: name.into(),
            from,
            to,
        }
    }

    /// Whether the value actually changed.
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}
