//! Scheme administration events.

use serde::{Deserialize, Serialize};

use crate::types::id::{ProjectId, SchemeId, SecurityLevelId};

/// The family a scheme belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    /// Grants project permissions.
    Permission,
    /// Routes issue events to notification recipients.
    Notification,
    /// Defines issue security levels.
    IssueSecurity,
}

impl SchemeKind {
    /// Human-readable label used in audit summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Permission => "Permission scheme",
            Self::Notification => "Notification scheme",
            Self::IssueSecurity => "Issue security scheme",
        }
    }
}

/// A grant as it appears in an event: security type key plus parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantDescriptor {
    /// Security type key (e.g. `"group"`, `"projectrole"`).
    pub grant_type: String,
    /// Type parameter (group name, role id, ...), absent for parameterless types.
    pub parameter: Option<String>,
}

/// Events raised when schemes or their grants change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SchemeEvent {
    /// A scheme was created.
    Created {
        /// Scheme family.
        kind: SchemeKind,
        /// New scheme ID.
        scheme_id: SchemeId,
        /// Scheme name.
        name: String,
    },
    /// A scheme's name or description changed.
    Updated {
        /// Scheme family.
        kind: SchemeKind,
        /// Scheme ID.
        scheme_id: SchemeId,
        /// Name before the change.
        original_name: String,
        /// Name after the change.
        name: String,
        /// Description before the change.
        original_description: Option<String>,
        /// Description after the change.
        description: Option<String>,
    },
    /// A scheme was deleted.
    Deleted {
        /// Scheme family.
        kind: SchemeKind,
        /// Deleted scheme ID.
        scheme_id: SchemeId,
        /// Scheme name.
        name: String,
    },
    /// A scheme was copied into a new scheme.
    Copied {
        /// Scheme family.
        kind: SchemeKind,
        /// Source scheme ID.
        from_id: SchemeId,
        /// Source scheme name.
        from_name: String,
        /// New scheme ID.
        to_id: SchemeId,
        /// New scheme name.
        to_name: String,
    },
    /// A scheme was associated with a project.
    AddedToProject {
        /// Scheme family.
        kind: SchemeKind,
        /// Scheme ID.
        scheme_id: SchemeId,
        /// Scheme name.
        scheme_name: String,
        /// Project ID.
        project_id: ProjectId,
        /// Project name.
        project_name: String,
    },
    /// A scheme was dissociated from a project.
    RemovedFromProject {
        /// Scheme family.
        kind: SchemeKind,
        /// Scheme ID.
        scheme_id: SchemeId,
        /// Scheme name.
        scheme_name: String,
        /// Project ID.
        project_id: ProjectId,
        /// Project name.
        project_name: String,
    },
    /// A permission grant was added to a permission scheme.
    PermissionAdded {
        /// Scheme ID.
        scheme_id: SchemeId,
        /// Scheme name.
        scheme_name: String,
        /// Permission granted.
        permission_id: i64,
        /// Who receives it.
        grant: GrantDescriptor,
    },
    /// A permission grant was removed from a permission scheme.
    PermissionDeleted {
        /// Scheme ID.
        scheme_id: SchemeId,
        /// Scheme name.
        scheme_name: String,
        /// Permission revoked.
        permission_id: i64,
        /// Who held it.
        grant: GrantDescriptor,
    },
    /// A notification recipient was added to a notification scheme.
    NotificationAdded {
        /// Scheme ID.
        scheme_id: SchemeId,
        /// Scheme name.
        scheme_name: String,
        /// Issue event type the notification fires on.
        event_type_id: i64,
        /// Who is notified.
        grant: GrantDescriptor,
    },
    /// A notification recipient was removed from a notification scheme.
    NotificationDeleted {
        /// Scheme ID.
        scheme_id: SchemeId,
        /// Scheme name.
        scheme_name: String,
        /// Issue event type.
        event_type_id: i64,
        /// Who was notified.
        grant: GrantDescriptor,
    },
    /// A grant was added to an issue security level.
    SecurityLevelPermissionAdded {
        /// Issue security scheme ID.
        scheme_id: SchemeId,
        /// Level ID.
        level_id: SecurityLevelId,
        /// Level name.
        level_name: String,
        /// Who may see issues at this level.
        grant: GrantDescriptor,
    },
    /// A grant was removed from an issue security level.
    SecurityLevelPermissionDeleted {
        /// Issue security scheme ID.
        scheme_id: SchemeId,
        /// Level ID.
        level_id: SecurityLevelId,
        /// Level name.
        level_name: String,
        /// Who could see issues at this level.
        grant: GrantDescriptor,
    },
    /// An issue security level was deleted along with its grants.
    SecurityLevelDeleted {
        /// Issue security scheme ID.
        scheme_id: SchemeId,
        /// Level ID.
        level_id: SecurityLevelId,
        /// Level name.
        level_name: String,
    },
}

impl SchemeEvent {
    /// Whether the event can change which security levels a user holds.
    pub fn affects_security_levels(&self) -> bool {
        match self {
            Self::SecurityLevelPermissionAdded { .. }
            | Self::SecurityLevelPermissionDeleted { .. }
            | Self::SecurityLevelDeleted { .. } => true,
            Self::Deleted { kind, .. }
            | Self::AddedToProject { kind, .. }
            | Self::RemovedFromProject { kind, .. } => *kind == SchemeKind::IssueSecurity,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affects_security_levels() {
        let added = SchemeEvent::AddedToProject {
            kind: SchemeKind::IssueSecurity,
            scheme_id: SchemeId::new(1),
            scheme_name: "Default".into(),
            project_id: ProjectId::new(10000),
            project_name: "Monkey".into(),
        };
        assert!(added.affects_security_levels());

        let permission = SchemeEvent::AddedToProject {
            kind: SchemeKind::Permission,
            scheme_id: SchemeId::new(1),
            scheme_name: "Default".into(),
            project_id: ProjectId::new(10000),
            project_name: "Monkey".into(),
        };
        assert!(!permission.affects_security_levels());
    }

    #[test]
    fn test_serde_tagging() {
        let event = SchemeEvent::Created {
            kind: SchemeKind::Notification,
            scheme_id: SchemeId::new(10010),
            name: "Quiet".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Created");
        assert_eq!(json["kind"], "notification");
        assert_eq!(json["scheme_id"], 10010);
    }
}
