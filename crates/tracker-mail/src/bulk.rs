//! Administrator bulk mail: send one message to every member of a set of
//! groups, or of a set of project roles.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use tracker_core::error::{AppError, ErrorKind};
use tracker_core::result::AppResult;
use tracker_core::types::ErrorCollection;
use tracker_core::types::id::{ProjectId, ProjectRoleId};
use tracker_database::store::{ProjectRoleStore, UserDirectory};
use tracker_entity::user::ApplicationUser;

use crate::message::{MailMessage, MimeType};
use crate::sender::MailTransport;

/// Field that recipient-selection errors are reported against.
pub const RECIPIENTS_FIELD: &str = "sendToRoles";

/// A bulk mail submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkMailRequest {
    /// Address project roles instead of groups.
    pub send_to_roles: bool,
    /// Group names, used when `send_to_roles` is false.
    pub groups: Vec<String>,
    /// Projects whose role members are addressed.
    pub projects: Vec<ProjectId>,
    /// Roles to address within each project.
    pub roles: Vec<ProjectRoleId>,
    /// Subject line.
    pub subject: String,
    /// `"text"` or `"html"`.
    pub message_type: String,
    /// Body.
    pub message: String,
    /// Reply-To address. Defaults to the sender's address.
    pub reply_to: Option<String>,
    /// Put recipients in Bcc instead of To.
    pub send_blind_copy: bool,
}

/// Outcome of a successful bulk send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMailReport {
    /// Users the message was addressed to, in send order.
    pub recipients: Vec<String>,
    /// Number of messages handed to the transport.
    pub messages: usize,
}

/// Resolves recipients and sends the message in batches.
pub struct BulkMailService {
    directory: Arc<dyn UserDirectory>,
    roles: Arc<dyn ProjectRoleStore>,
    transport: Option<Arc<dyn MailTransport>>,
    batch_size: usize,
}

impl std::fmt::Debug for BulkMailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkMailService")
            .field("has_mail_server", &self.transport.is_some())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl BulkMailService {
    /// Create the service. `transport` is `None` when no mail server is
    /// configured; every send then fails with `no.mail.server`.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        roles: Arc<dyn ProjectRoleStore>,
        transport: Option<Arc<dyn MailTransport>>,
        batch_size: usize,
    ) -> Self {
        Self {
            directory,
            roles,
            transport,
            batch_size: batch_size.max(1),
        }
    }

    /// Whether a mail server is configured.
    pub fn has_mail_server(&self) -> bool {
        self.transport.is_some()
    }

    /// Validate `request`, resolve its recipients, and send it on behalf
    /// of `sender`.
    pub async fn send(
        &self,
        sender: &ApplicationUser,
        request: &BulkMailRequest,
    ) -> AppResult<BulkMailReport> {
        let Some(transport) = &self.transport else {
            return Err(ErrorCollection::of("no.mail.server").into());
        };

        let mime_type = validate(request)?;

        let users = self.recipients(request).await?;
        if users.is_empty() {
            let mut errors = ErrorCollection::new();
            errors.add_error(
                RECIPIENTS_FIELD,
                if request.send_to_roles {
                    "empty.projectroles"
                } else {
                    "empty.groups"
                },
            );
            return Err(errors.into());
        }

        let reply_to = request
            .reply_to
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .or_else(|| sender.email_address.clone());

        let undeliverable: Vec<&str> = users
            .iter()
            .filter(|u| {
                u.email_address
                    .as_deref()
                    .is_some_and(|a| a.parse::<lettre::Address>().is_err())
            })
            .map(|u| u.username.as_str())
            .collect();
        if !undeliverable.is_empty() {
            let mut errors = ErrorCollection::new();
            errors.add_error(RECIPIENTS_FIELD, "invalid.recipient.email");
            errors.add_error_message(format!(
                "Invalid email address for: {}",
                undeliverable.join(", ")
            ));
            return Err(errors.into());
        }

        let addresses: Vec<String> = users
            .iter()
            .filter_map(|u| u.email_address.clone())
            .collect();

        let mut messages = 0;
        for batch in addresses.chunks(self.batch_size) {
            let message = MailMessage::new(request.subject.clone(), request.message.clone(), mime_type)
                .from_name(sender.username.clone())
                .reply_to(reply_to.clone());
            let message = if request.send_blind_copy {
                message.bcc(batch.to_vec())
            } else {
                message.to(batch.to_vec())
            };

            transport.send(message).await.map_err(|e| {
                tracing::error!(error = %e, sent = messages, "Bulk mail delivery failed");
                AppError::new(ErrorKind::ExternalService, format!("failed.to.send: {}", e.message))
            })?;
            messages += 1;
        }

        tracing::info!(
            sender = %sender.username,
            recipients = addresses.len(),
            messages,
            "Bulk mail sent"
        );

        Ok(BulkMailReport {
            recipients: users.into_iter().map(|u| u.username).collect(),
            messages,
        })
    }

    /// Active users with an email address, deduplicated in first-seen order.
    async fn recipients(&self, request: &BulkMailRequest) -> AppResult<Vec<ApplicationUser>> {
        let mut found = Vec::new();
        if request.send_to_roles {
            for project in &request.projects {
                for role in &request.roles {
                    found.extend(self.roles.role_members(*role, *project).await?);
                }
            }
        } else {
            for group in &request.groups {
                found.extend(self.directory.group_members(group).await?);
            }
        }

        let mut seen = HashSet::new();
        Ok(found
            .into_iter()
            .filter(|u| u.active && u.email_address.is_some())
            .filter(|u| seen.insert(u.key.clone()))
            .collect())
    }
}

fn validate(request: &BulkMailRequest) -> AppResult<MimeType> {
    let mut errors = ErrorCollection::new();

    if request.send_to_roles {
        match (request.roles.is_empty(), request.projects.is_empty()) {
            (true, true) => errors.add_error(RECIPIENTS_FIELD, "select.one.project.and.role"),
            (false, true) => errors.add_error(RECIPIENTS_FIELD, "select.one.project"),
            (true, false) => errors.add_error(RECIPIENTS_FIELD, "select.one.role"),
            (false, false) => {}
        }
    } else if request.groups.iter().all(|g| g.trim().is_empty()) {
        errors.add_error(RECIPIENTS_FIELD, "select.one.group");
    }

    if request.subject.trim().is_empty() {
        errors.add_error("subject", "no.subject");
    }

    let mime_type = request.message_type.parse::<MimeType>().ok();
    if mime_type.is_none() {
        errors.add_error("messageType", "no.message.type");
    }

    if request.message.trim().is_empty() {
        errors.add_error("message", "no.body");
    }

    if let Some(reply_to) = request.reply_to.as_deref().map(str::trim) {
        if !reply_to.is_empty() && !reply_to.validate_email() {
            errors.add_error("replyTo", "invalid.email");
        }
    }

    errors.into_result()?;
    Ok(mime_type.unwrap_or(MimeType::Text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tracker_entity::project::ProjectRole;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<MailMessage>>,
        fail_with: Option<String>,
    }

    impl RecordingTransport {
        fn sent(&self) -> Vec<MailMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, message: MailMessage) -> AppResult<()> {
            if let Some(cause) = &self.fail_with {
                return Err(AppError::external_service(cause.clone()));
            }
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Members {
        groups: HashMap<String, Vec<ApplicationUser>>,
        roles: HashMap<(ProjectRoleId, ProjectId), Vec<ApplicationUser>>,
    }

    #[async_trait]
    impl UserDirectory for Members {
        async fn user_by_name(&self, _: &str) -> AppResult<Option<ApplicationUser>> {
            Ok(None)
        }
        async fn user_by_key(&self, _: &str) -> AppResult<Option<ApplicationUser>> {
            Ok(None)
        }
        async fn group_exists(&self, group: &str) -> AppResult<bool> {
            Ok(self.groups.contains_key(group))
        }
        async fn is_user_in_group(&self, username: &str, group: &str) -> AppResult<bool> {
            Ok(self
                .groups
                .get(group)
                .is_some_and(|m| m.iter().any(|u| u.username == username)))
        }
        async fn group_members(&self, group: &str) -> AppResult<Vec<ApplicationUser>> {
            Ok(self.groups.get(group).cloned().unwrap_or_default())
        }
    }

    #[async_trait]
    impl ProjectRoleStore for Members {
        async fn role_by_id(&self, _: ProjectRoleId) -> AppResult<Option<ProjectRole>> {
            Ok(None)
        }
        async fn is_user_in_role(
            &self,
            _: &ApplicationUser,
            _: ProjectRoleId,
            _: ProjectId,
        ) -> AppResult<bool> {
            Ok(false)
        }
        async fn role_members(
            &self,
            role: ProjectRoleId,
            project: ProjectId,
        ) -> AppResult<Vec<ApplicationUser>> {
            Ok(self.roles.get(&(role, project)).cloned().unwrap_or_default())
        }
    }

    fn mailable(name: &str) -> ApplicationUser {
        ApplicationUser::new(name, name).with_email(format!("{name}@example.com"))
    }

    fn sender() -> ApplicationUser {
        ApplicationUser::new("testuser", "Test User").with_email("quite@delicio.us")
    }

    fn service(
        members: Members,
        transport: Option<Arc<RecordingTransport>>,
        batch_size: usize,
    ) -> BulkMailService {
        let members = Arc::new(members);
        BulkMailService::new(
            members.clone(),
            members,
            transport.map(|t| t as Arc<dyn MailTransport>),
            batch_size,
        )
    }

    fn valid_request() -> BulkMailRequest {
        BulkMailRequest {
            subject: "Maintenance".into(),
            message_type: "text".into(),
            message: "Down at noon".into(),
            ..BulkMailRequest::default()
        }
    }

    fn field_errors(err: AppError) -> std::collections::BTreeMap<String, String> {
        assert_eq!(err.kind, ErrorKind::Validation);
        err.errors.expect("field errors").errors
    }

    #[tokio::test]
    async fn test_no_mail_server() {
        let service = service(Members::default(), None, 100);
        assert!(!service.has_mail_server());

        let err = service.send(&sender(), &valid_request()).await.unwrap_err();
        assert_eq!(err.errors.unwrap().error_messages, vec!["no.mail.server"]);
    }

    #[tokio::test]
    async fn test_missing_fields_are_reported() {
        let service = service(Members::default(), Some(Arc::default()), 100);
        let request = BulkMailRequest {
            reply_to: Some("bademail".into()),
            ..BulkMailRequest::default()
        };

        let errors = field_errors(service.send(&sender(), &request).await.unwrap_err());
        assert_eq!(errors["sendToRoles"], "select.one.group");
        assert_eq!(errors["subject"], "no.subject");
        assert_eq!(errors["messageType"], "no.message.type");
        assert_eq!(errors["message"], "no.body");
        assert_eq!(errors["replyTo"], "invalid.email");
    }

    #[tokio::test]
    async fn test_role_selection_errors() {
        let service = service(Members::default(), Some(Arc::default()), 100);
        let cases = [
            (vec![], vec![], "select.one.project.and.role"),
            (vec![ProjectRoleId::new(1)], vec![], "select.one.project"),
            (vec![], vec![ProjectId::new(1)], "select.one.role"),
        ];

        for (roles, projects, expected) in cases {
            let request = BulkMailRequest {
                send_to_roles: true,
                roles,
                projects,
                ..valid_request()
            };
            let errors = field_errors(service.send(&sender(), &request).await.unwrap_err());
            assert_eq!(errors["sendToRoles"], expected);
        }
    }

    #[tokio::test]
    async fn test_malformed_recipient_address_sends_nothing() {
        let mut members = Members::default();
        let broken = ApplicationUser::new("wilma", "wilma").with_email("wilma at example");
        members.groups.insert(
            "jira-developers".into(),
            vec![mailable("fred"), mailable("barney"), broken],
        );
        let transport = Arc::new(RecordingTransport::default());
        let service = service(members, Some(transport.clone()), 1);

        let request = BulkMailRequest {
            groups: vec!["jira-developers".into()],
            ..valid_request()
        };
        let err = service.send(&sender(), &request).await.unwrap_err();
        let errors = err.errors.expect("field errors");
        assert_eq!(errors.errors["sendToRoles"], "invalid.recipient.email");
        assert_eq!(errors.error_messages, vec!["Invalid email address for: wilma"]);
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_empty_recipient_sets() {
        let mut members = Members::default();
        members
            .groups
            .insert("empty".into(), vec![mailable("gone").deactivated()]);
        let service = service(members, Some(Arc::default()), 100);

        let request = BulkMailRequest {
            groups: vec!["empty".into()],
            ..valid_request()
        };
        let errors = field_errors(service.send(&sender(), &request).await.unwrap_err());
        assert_eq!(errors["sendToRoles"], "empty.groups");

        let request = BulkMailRequest {
            send_to_roles: true,
            roles: vec![ProjectRoleId::new(1)],
            projects: vec![ProjectId::new(1)],
            ..valid_request()
        };
        let errors = field_errors(service.send(&sender(), &request).await.unwrap_err());
        assert_eq!(errors["sendToRoles"], "empty.projectroles");
    }

    #[tokio::test]
    async fn test_role_members_are_deduplicated_in_order() {
        let mut members = Members::default();
        let project = ProjectId::new(1);
        members
            .roles
            .insert((ProjectRoleId::new(1), project), vec![mailable("user1"), mailable("user2")]);
        members
            .roles
            .insert((ProjectRoleId::new(2), project), vec![mailable("user2"), mailable("user3")]);
        let transport = Arc::new(RecordingTransport::default());
        let service = service(members, Some(transport.clone()), 100);

        let request = BulkMailRequest {
            send_to_roles: true,
            projects: vec![project],
            roles: vec![ProjectRoleId::new(1), ProjectRoleId::new(2), ProjectRoleId::new(3)],
            ..valid_request()
        };
        let report = service.send(&sender(), &request).await.unwrap();

        assert_eq!(report.recipients, vec!["user1", "user2", "user3"]);
        assert_eq!(report.messages, 1);
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_addressing_defaults() {
        let mut members = Members::default();
        members.groups.insert("devs".into(), vec![sender()]);
        let transport = Arc::new(RecordingTransport::default());
        let service = service(members, Some(transport.clone()), 100);

        let request = BulkMailRequest {
            groups: vec!["devs".into()],
            ..valid_request()
        };
        service.send(&sender(), &request).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].from_name.as_deref(), Some("testuser"));
        assert_eq!(sent[0].to, vec!["quite@delicio.us"]);
        assert!(sent[0].bcc.is_empty());
        assert_eq!(sent[0].reply_to.as_deref(), Some("quite@delicio.us"));
        assert_eq!(sent[0].mime_type, MimeType::Text);
    }

    #[tokio::test]
    async fn test_explicit_reply_to_and_blind_copy() {
        let mut members = Members::default();
        members.groups.insert("devs".into(), vec![mailable("fred")]);
        let transport = Arc::new(RecordingTransport::default());
        let service = service(members, Some(transport.clone()), 100);

        let request = BulkMailRequest {
            groups: vec!["devs".into()],
            reply_to: Some("recepient@validemail.net".into()),
            send_blind_copy: true,
            message_type: "html".into(),
            ..valid_request()
        };
        service.send(&sender(), &request).await.unwrap();

        let sent = transport.sent();
        assert!(sent[0].to.is_empty());
        assert_eq!(sent[0].bcc, vec!["fred@example.com"]);
        assert_eq!(sent[0].reply_to.as_deref(), Some("recepient@validemail.net"));
        assert_eq!(sent[0].mime_type, MimeType::Html);
    }

    #[tokio::test]
    async fn test_recipients_are_split_into_batches() {
        let mut members = Members::default();
        members
            .groups
            .insert("g1".into(), vec![mailable("email1"), mailable("email2")]);
        members
            .groups
            .insert("g2".into(), vec![mailable("email3"), mailable("email4")]);
        let transport = Arc::new(RecordingTransport::default());
        let service = service(members, Some(transport.clone()), 3);

        let request = BulkMailRequest {
            groups: vec!["g1".into(), "g2".into(), "g3".into()],
            ..valid_request()
        };
        let report = service.send(&sender(), &request).await.unwrap();
        assert_eq!(report.messages, 2);

        let sent = transport.sent();
        assert_eq!(
            sent[0].to,
            vec!["email1@example.com", "email2@example.com", "email3@example.com"]
        );
        assert_eq!(sent[1].to, vec!["email4@example.com"]);
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let mut members = Members::default();
        members.groups.insert("devs".into(), vec![mailable("fred")]);
        let transport = Arc::new(RecordingTransport {
            fail_with: Some("Connection refused".into()),
            ..RecordingTransport::default()
        });
        let service = service(members, Some(transport), 100);

        let request = BulkMailRequest {
            groups: vec!["devs".into()],
            ..valid_request()
        };
        let err = service.send(&sender(), &request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert_eq!(err.message, "failed.to.send: Connection refused");
    }
}
