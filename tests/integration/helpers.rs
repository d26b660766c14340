//! Shared test helpers for integration tests.
//!
//! [`MemoryTracker`] implements every store trait over in-memory data so
//! the full router can be driven without a database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::{DateTime, Utc};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tracker_api::{AppState, build_app};
use tracker_core::config::AppConfig;
use tracker_core::result::AppResult;
use tracker_core::types::id::{
    AuditRecordId, ProjectId, ProjectRoleId, SchemeEntityId, SchemeId, SecurityLevelId,
};
use tracker_core::types::pagination::PageResponse;
use tracker_database::store::{
    AuditQuery, AuditStore, ProjectRoleStore, ProjectStore, SchemeStore, SecurityLevelStore,
    Stores, UserDirectory,
};
use tracker_entity::audit::{AuditRecord, RecordRequest};
use tracker_entity::permission::ProjectPermission;
use tracker_entity::project::{Project, ProjectRole};
use tracker_entity::scheme::{Scheme, SchemeEntity, SchemeType};
use tracker_entity::security::{IssueSecurityLevel, IssueSecurityLevelPermission};
use tracker_entity::user::ApplicationUser;
use tracker_mail::{MailMessage, MailTransport};

pub const MONKEY: i64 = 10000;
pub const HOMOSAPIEN: i64 = 10001;
pub const SECRET_LEVEL: i64 = 10100;
pub const DEVELOPERS_ROLE: i64 = 10002;

/// In-memory implementation of every store.
#[derive(Default)]
pub struct MemoryTracker {
    users: Vec<ApplicationUser>,
    memberships: Vec<(String, String)>,
    projects: Vec<Project>,
    role_actors: Vec<(ProjectId, ProjectRoleId, String)>,
    entities: Vec<SchemeEntity>,
    levels: Vec<IssueSecurityLevel>,
    level_grants: Vec<IssueSecurityLevelPermission>,
    audit: Mutex<Vec<AuditRecord>>,
}

impl MemoryTracker {
    /// Two projects sharing permission scheme 0; Monkey also has issue
    /// security scheme 10000 with one level.
    pub fn seeded() -> Self {
        let mut tracker = Self::default();

        tracker.users = vec![
            ApplicationUser::new("admin", "Administrator").with_email("admin@example.com"),
            ApplicationUser::new("fred", "Fred Normal").with_email("fred@example.com"),
            ApplicationUser::new("wilma", "Wilma").with_email("wilma@example.com"),
            ApplicationUser::new("barney", "Barney")
                .with_email("barney@example.com")
                .deactivated(),
        ];
        tracker.memberships = vec![
            ("tracker-administrators".into(), "admin".into()),
            ("jira-developers".into(), "fred".into()),
            ("jira-developers".into(), "wilma".into()),
            ("jira-developers".into(), "barney".into()),
        ];

        let mut monkey = Project::new(ProjectId::new(MONKEY), "MKY", "monkey");
        monkey.permission_scheme_id = Some(SchemeId::new(0));
        monkey.issue_security_scheme_id = Some(SchemeId::new(10000));
        let mut homosapien = Project::new(ProjectId::new(HOMOSAPIEN), "HSP", "homosapien");
        homosapien.permission_scheme_id = Some(SchemeId::new(0));
        tracker.projects = vec![homosapien, monkey];

        tracker.role_actors = vec![(
            ProjectId::new(MONKEY),
            ProjectRoleId::new(DEVELOPERS_ROLE),
            "fred".into(),
        )];

        let grants: [(&str, Option<&str>, ProjectPermission); 3] = [
            ("group", Some("jira-developers"), ProjectPermission::BROWSE),
            ("reporter", None, ProjectPermission::BROWSE),
            ("group", None, ProjectPermission::CREATE_ISSUE),
        ];
        for (i, (entity_type, parameter, permission)) in grants.into_iter().enumerate() {
            tracker.entities.push(SchemeEntity::new(
                SchemeEntityId::new(i as i64 + 1),
                SchemeId::new(0),
                entity_type,
                parameter.map(str::to_string),
                permission.id(),
            ));
        }

        tracker.levels = vec![IssueSecurityLevel::new(
            SecurityLevelId::new(SECRET_LEVEL),
            SchemeId::new(10000),
            "Secret",
        )];
        tracker.level_grants = vec![IssueSecurityLevelPermission::new(
            SchemeEntityId::new(1),
            SchemeId::new(10000),
            SecurityLevelId::new(SECRET_LEVEL),
            "group",
            Some("jira-developers".into()),
        )];

        tracker
    }

    /// Every stored audit record, oldest first.
    pub fn audit_records(&self) -> Vec<AuditRecord> {
        self.audit.lock().unwrap().clone()
    }

    fn user(&self, key: &str) -> Option<ApplicationUser> {
        self.users.iter().find(|u| u.key == key).cloned()
    }
}

#[async_trait]
impl UserDirectory for MemoryTracker {
    async fn user_by_name(&self, username: &str) -> AppResult<Option<ApplicationUser>> {
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }

    async fn user_by_key(&self, key: &str) -> AppResult<Option<ApplicationUser>> {
        Ok(self.user(key))
    }

    async fn group_exists(&self, group: &str) -> AppResult<bool> {
        Ok(self.memberships.iter().any(|(g, _)| g == group))
    }

    async fn is_user_in_group(&self, username: &str, group: &str) -> AppResult<bool> {
        Ok(self
            .memberships
            .iter()
            .any(|(g, u)| g == group && u == username))
    }

    async fn group_members(&self, group: &str) -> AppResult<Vec<ApplicationUser>> {
        Ok(self
            .memberships
            .iter()
            .filter(|(g, _)| g == group)
            .filter_map(|(_, u)| self.user(u))
            .collect())
    }
}

#[async_trait]
impl ProjectStore for MemoryTracker {
    async fn all_projects(&self) -> AppResult<Vec<Project>> {
        Ok(self.projects.clone())
    }

    async fn project_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        Ok(self.projects.iter().find(|p| p.id == id).cloned())
    }
}

#[async_trait]
impl ProjectRoleStore for MemoryTracker {
    async fn role_by_id(&self, id: ProjectRoleId) -> AppResult<Option<ProjectRole>> {
        Ok((id == ProjectRoleId::new(DEVELOPERS_ROLE)).then(|| ProjectRole {
            id,
            name: "Developers".into(),
            description: None,
        }))
    }

    async fn is_user_in_role(
        &self,
        user: &ApplicationUser,
        role: ProjectRoleId,
        project: ProjectId,
    ) -> AppResult<bool> {
        Ok(self
            .role_actors
            .iter()
            .any(|(p, r, k)| *p == project && *r == role && *k == user.key))
    }

    async fn role_members(
        &self,
        role: ProjectRoleId,
        project: ProjectId,
    ) -> AppResult<Vec<ApplicationUser>> {
        Ok(self
            .role_actors
            .iter()
            .filter(|(p, r, _)| *p == project && *r == role)
            .filter_map(|(_, _, k)| self.user(k))
            .collect())
    }
}

#[async_trait]
impl SchemeStore for MemoryTracker {
    async fn permission_schemes(&self, project: &Project) -> AppResult<Vec<Scheme>> {
        Ok(project
            .permission_scheme_id
            .map(|id| Scheme {
                id,
                name: "Default Permission Scheme".into(),
                description: None,
                scheme_type: SchemeType::PermissionScheme,
            })
            .into_iter()
            .collect())
    }

    async fn entities(&self, scheme: SchemeId, entity_type_id: i64) -> AppResult<Vec<SchemeEntity>> {
        Ok(self
            .entities
            .iter()
            .filter(|e| e.scheme_id == scheme && e.entity_type_id == entity_type_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SecurityLevelStore for MemoryTracker {
    async fn level(&self, id: SecurityLevelId) -> AppResult<Option<IssueSecurityLevel>> {
        Ok(self.levels.iter().find(|l| l.id == id).cloned())
    }

    async fn levels_for_scheme(&self, scheme: SchemeId) -> AppResult<Vec<IssueSecurityLevel>> {
        Ok(self
            .levels
            .iter()
            .filter(|l| l.scheme_id == scheme)
            .cloned()
            .collect())
    }

    async fn permissions_for_scheme(
        &self,
        scheme: SchemeId,
    ) -> AppResult<Vec<IssueSecurityLevelPermission>> {
        Ok(self
            .level_grants
            .iter()
            .filter(|g| g.scheme_id == scheme)
            .cloned()
            .collect())
    }

    async fn permissions_for_level(
        &self,
        level: SecurityLevelId,
    ) -> AppResult<Vec<IssueSecurityLevelPermission>> {
        Ok(self
            .level_grants
            .iter()
            .filter(|g| g.security_level_id == level)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AuditStore for MemoryTracker {
    async fn insert(&self, request: RecordRequest, created: DateTime<Utc>) -> AppResult<AuditRecord> {
        let mut records = self.audit.lock().unwrap();
        let record = request.into_record(AuditRecordId::new(records.len() as i64 + 1), created);
        records.push(record.clone());
        Ok(record)
    }

    async fn find(&self, query: &AuditQuery) -> AppResult<PageResponse<AuditRecord>> {
        let matching: Vec<AuditRecord> = self
            .audit
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(query.page.offset as usize)
            .take(query.page.limit as usize)
            .collect();
        Ok(PageResponse::new(items, &query.page, total))
    }
}

/// Records messages instead of sending them.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<MailMessage>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Response captured from the router.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing stores
    pub tracker: Arc<MemoryTracker>,
    /// Outgoing mail, when a mail server is configured
    pub mail: Option<Arc<RecordingTransport>>,
}

impl TestApp {
    /// App with a mail server.
    pub fn new() -> Self {
        Self::build(true)
    }

    /// App with no mail server configured.
    pub fn without_mail() -> Self {
        Self::build(false)
    }

    fn build(with_mail: bool) -> Self {
        let config = AppConfig::from_toml(
            r#"
            [database]
            url = "postgres://unused/tracker"

            [mail]
            enabled = true
            recipient_batch_size = 100
            "#,
        )
        .expect("test config should parse");

        let tracker = Arc::new(MemoryTracker::seeded());
        let stores = Stores {
            projects: tracker.clone(),
            roles: tracker.clone(),
            schemes: tracker.clone(),
            security_levels: tracker.clone(),
            directory: tracker.clone(),
            audit: tracker.clone(),
        };

        let mail = with_mail.then(|| Arc::new(RecordingTransport::default()));
        let transport = mail.clone().map(|t| t as Arc<dyn MailTransport>);

        let state = AppState::new(config, stores, transport, None);
        Self {
            router: build_app(state),
            tracker,
            mail,
        }
    }

    /// Send a request as `user` (anonymous when `None`).
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(user) = user {
            builder = builder.header("X-Tracker-User", user);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.dispatch(request).await
    }

    /// Send `body` verbatim as a JSON request body.
    pub async fn request_raw(&self, method: &str, path: &str, body: &str, user: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("X-Tracker-User", user)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
