//! Turns scheme administration events into audit records.

use tracing::{debug, instrument};

use tracker_auth::IssueSecurityLevelResolver;
use tracker_auth::security_type::{
    GroupSecurityType, ProjectRoleSecurityType, SingleUserSecurityType,
};
use tracker_core::events::scheme::{GrantDescriptor, SchemeEvent, SchemeKind};
use tracker_core::result::AppResult;
use tracker_core::types::id::SchemeId;
use tracker_entity::audit::{
    AssociatedItem, AssociatedItemType, AuditRecord, AuditingCategory, ChangedValue, RecordRequest,
};
use tracker_entity::permission::ProjectPermission;

use crate::audit::manager::AuditingManager;
use crate::context::RequestContext;

/// Records scheme events in the audit log and keeps the security level
/// cache consistent with scheme changes.
#[derive(Debug, Clone)]
pub struct AuditEventHandler {
    auditing: AuditingManager,
    security_levels: Option<IssueSecurityLevelResolver>,
}

impl AuditEventHandler {
    /// Creates a handler. `security_levels` is cleared whenever an event
    /// can change the levels a user holds.
    pub fn new(auditing: AuditingManager, security_levels: Option<IssueSecurityLevelResolver>) -> Self {
        Self {
            auditing,
            security_levels,
        }
    }

    /// Audit `event` on behalf of `ctx`.
    #[instrument(skip_all)]
    pub async fn handle(&self, ctx: &RequestContext, event: &SchemeEvent) -> AppResult<AuditRecord> {
        if event.affects_security_levels() {
            if let Some(resolver) = &self.security_levels {
                resolver.clear();
            }
        }

        let request = record_for(event);
        debug!(summary = %request.summary, "Auditing scheme event");
        self.auditing.store_for(ctx, request).await
    }
}

/// Build the audit record request describing `event`.
pub fn record_for(event: &SchemeEvent) -> RecordRequest {
    match event {
        SchemeEvent::Created {
            kind,
            scheme_id,
            name,
        } => RecordRequest::new(category(*kind), format!("{} created", kind.label()))
            .for_object(scheme_item(*kind, name, *scheme_id)),

        SchemeEvent::Updated {
            kind,
            scheme_id,
            original_name,
            name,
            original_description,
            description,
        } => RecordRequest::new(category(*kind), format!("{} updated", kind.label()))
            .for_object(scheme_item(*kind, name, *scheme_id))
            .with_changed_values([
                ChangedValue::new("Name", Some(original_name.clone()), Some(name.clone())),
                ChangedValue::new(
                    "Description",
                    original_description.clone(),
                    description.clone(),
                ),
            ]),

        SchemeEvent::Deleted {
            kind,
            scheme_id,
            name,
        } => RecordRequest::new(category(*kind), format!("{} deleted", kind.label()))
            .for_object(scheme_item(*kind, name, *scheme_id)),

        SchemeEvent::Copied {
            kind,
            from_id,
            from_name,
            to_id,
            to_name,
        } => RecordRequest::new(category(*kind), format!("{} copied", kind.label()))
            .for_object(scheme_item(*kind, to_name, *to_id))
            .with_associated_items([scheme_item(*kind, from_name, *from_id)]),

        SchemeEvent::AddedToProject {
            kind,
            scheme_id,
            scheme_name,
            project_id,
            project_name,
        } => RecordRequest::new(category(*kind), format!("{} added to project", kind.label()))
            .for_object(scheme_item(*kind, scheme_name, *scheme_id))
            .with_associated_items([AssociatedItem::new(
                AssociatedItemType::Project,
                project_name.clone(),
                project_id,
            )]),

        SchemeEvent::RemovedFromProject {
            kind,
            scheme_id,
            scheme_name,
            project_id,
            project_name,
        } => RecordRequest::new(
            category(*kind),
            format!("{} removed from project", kind.label()),
        )
        .for_object(scheme_item(*kind, scheme_name, *scheme_id))
        .with_associated_items([AssociatedItem::new(
            AssociatedItemType::Project,
            project_name.clone(),
            project_id,
        )]),

        SchemeEvent::PermissionAdded {
            scheme_id,
            scheme_name,
            permission_id,
            grant,
        } => RecordRequest::new(
            AuditingCategory::Permissions,
            "Permission added to permission scheme",
        )
        .for_object(scheme_item(SchemeKind::Permission, scheme_name, *scheme_id))
        .with_associated_items(grant_item(grant))
        .with_changed_values([
            ChangedValue::new(
                "Permission",
                None,
                Some(ProjectPermission::new(*permission_id).to_string()),
            ),
            ChangedValue::new("Type", None, Some(describe_grant(grant))),
        ]),

        SchemeEvent::PermissionDeleted {
            scheme_id,
            scheme_name,
            permission_id,
            grant,
        } => RecordRequest::new(
            AuditingCategory::Permissions,
            "Permission deleted from permission scheme",
        )
        .for_object(scheme_item(SchemeKind::Permission, scheme_name, *scheme_id))
        .with_associated_items(grant_item(grant))
        .with_changed_values([
            ChangedValue::new(
                "Permission",
                Some(ProjectPermission::new(*permission_id).to_string()),
                None,
            ),
            ChangedValue::new("Type", Some(describe_grant(grant)), None),
        ]),

        SchemeEvent::NotificationAdded {
            scheme_id,
            scheme_name,
            event_type_id,
            grant,
        } => RecordRequest::new(
            AuditingCategory::Notifications,
            "Notification added to notification scheme",
        )
        .for_object(scheme_item(SchemeKind::Notification, scheme_name, *scheme_id))
        .with_associated_items(grant_item(grant))
        .with_changed_values([
            ChangedValue::new("Event", None, Some(event_type_id.to_string())),
            ChangedValue::new("Type", None, Some(describe_grant(grant))),
        ]),

        SchemeEvent::NotificationDeleted {
            scheme_id,
            scheme_name,
            event_type_id,
            grant,
        } => RecordRequest::new(
            AuditingCategory::Notifications,
            "Notification deleted from notification scheme",
        )
        .for_object(scheme_item(SchemeKind::Notification, scheme_name, *scheme_id))
        .with_associated_items(grant_item(grant))
        .with_changed_values([
            ChangedValue::new("Event", Some(event_type_id.to_string()), None),
            ChangedValue::new("Type", Some(describe_grant(grant)), None),
        ]),

        SchemeEvent::SecurityLevelPermissionAdded {
            scheme_id,
            level_id,
            level_name,
            grant,
        } => RecordRequest::new(
            AuditingCategory::Permissions,
            "Issue security level permission added",
        )
        .for_object(
            AssociatedItem::new(AssociatedItemType::IssueSecurityLevel, level_name.clone(), level_id)
                .with_parent(SchemeKind::IssueSecurity.label(), scheme_id),
        )
        .with_associated_items(grant_item(grant))
        .with_changed_values([ChangedValue::new("Type", None, Some(describe_grant(grant)))]),

        SchemeEvent::SecurityLevelPermissionDeleted {
            scheme_id,
            level_id,
            level_name,
            grant,
        } => RecordRequest::new(
            AuditingCategory::Permissions,
            "Issue security level permission deleted",
        )
        .for_object(
            AssociatedItem::new(AssociatedItemType::IssueSecurityLevel, level_name.clone(), level_id)
                .with_parent(SchemeKind::IssueSecurity.label(), scheme_id),
        )
        .with_associated_items(grant_item(grant))
        .with_changed_values([ChangedValue::new("Type", Some(describe_grant(grant)), None)]),

        SchemeEvent::SecurityLevelDeleted {
            scheme_id,
            level_id,
            level_name,
        } => RecordRequest::new(AuditingCategory::Permissions, "Issue security level deleted")
            .for_object(
                AssociatedItem::new(
                    AssociatedItemType::IssueSecurityLevel,
                    level_name.clone(),
                    level_id,
                )
                .with_parent(SchemeKind::IssueSecurity.label(), scheme_id),
            ),
    }
}

fn category(kind: SchemeKind) -> AuditingCategory {
    match kind {
        SchemeKind::Permission | SchemeKind::IssueSecurity => AuditingCategory::Permissions,
        SchemeKind::Notification => AuditingCategory::Notifications,
    }
}

fn scheme_item(kind: SchemeKind, name: &str, id: SchemeId) -> AssociatedItem {
    let item_type = match kind {
        SchemeKind::Notification => AssociatedItemType::NotificationScheme,
        SchemeKind::Permission | SchemeKind::IssueSecurity => AssociatedItemType::Scheme,
    };
    AssociatedItem::new(item_type, name, id)
}

/// The directory object a grant points at, when it names one.
fn grant_item(grant: &GrantDescriptor) -> Option<AssociatedItem> {
    let parameter = grant.parameter.as_deref().filter(|p| !p.is_empty())?;
    let item_type = match grant.grant_type.as_str() {
        GroupSecurityType::KEY => AssociatedItemType::Group,
        ProjectRoleSecurityType::KEY => AssociatedItemType::ProjectRole,
        SingleUserSecurityType::KEY => AssociatedItemType::User,
        _ => return None,
    };
    Some(AssociatedItem::new(item_type, parameter, parameter))
}

fn describe_grant(grant: &GrantDescriptor) -> String {
    match grant.parameter.as_deref().filter(|p| !p.is_empty()) {
        Some(parameter) => format!("{} ({parameter})", grant.grant_type),
        None if grant.grant_type == GroupSecurityType::KEY => "group (anyone)".to_string(),
        None => grant.grant_type.clone(),
    }
}
