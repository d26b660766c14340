//! In-memory store fakes shared by this crate's unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use tracker_core::result::AppResult;
use tracker_core::types::id::{ProjectId, ProjectRoleId, SchemeEntityId, SchemeId, SecurityLevelId};
use tracker_database::store::{ProjectRoleStore, ProjectStore, SchemeStore, SecurityLevelStore, UserDirectory};
use tracker_entity::permission::ProjectPermission;
use tracker_entity::project::{Project, ProjectRole};
use tracker_entity::scheme::{Scheme, SchemeEntity, SchemeType};
use tracker_entity::security::{IssueSecurityLevel, IssueSecurityLevelPermission};
use tracker_entity::user::ApplicationUser;

pub fn user(name: &str) -> ApplicationUser {
    ApplicationUser::new(name, name)
}

pub fn project(id: i64, key: &str, name: &str) -> Project {
    Project::new(ProjectId::new(id), key, name)
}

/// Project 10000 "monkey" using permission scheme 1.
pub fn monkey() -> Project {
    let mut project = project(10000, "MKY", "monkey");
    project.permission_scheme_id = Some(SchemeId::new(1));
    project
}

pub fn level(id: i64, name: &str) -> IssueSecurityLevel {
    IssueSecurityLevel::new(SecurityLevelId::new(id), SchemeId::new(10000), name)
}

#[derive(Default)]
pub struct FakeDirectory {
    memberships: HashSet<(String, String)>,
}

impl FakeDirectory {
    pub fn with_member(mut self, group: &str, username: &str) -> Self {
        self.memberships.insert((group.to_string(), username.to_string()));
        self
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn user_by_name(&self, username: &str) -> AppResult<Option<ApplicationUser>> {
        Ok(Some(user(username)))
    }

    async fn user_by_key(&self, key: &str) -> AppResult<Option<ApplicationUser>> {
        Ok(Some(user(key)))
    }

    async fn group_exists(&self, group: &str) -> AppResult<bool> {
        Ok(self.memberships.iter().any(|(g, _)| g == group))
    }

    async fn is_user_in_group(&self, username: &str, group: &str) -> AppResult<bool> {
        Ok(self
            .memberships
            .contains(&(group.to_string(), username.to_string())))
    }

    async fn group_members(&self, group: &str) -> AppResult<Vec<ApplicationUser>> {
        Ok(self
            .memberships
            .iter()
            .filter(|(g, _)| g == group)
            .map(|(_, u)| user(u))
            .collect())
    }
}

#[derive(Default)]
pub struct FakeRoles {
    actors: HashSet<(ProjectId, ProjectRoleId, String)>,
}

impl FakeRoles {
    pub fn with_actor(mut self, project: ProjectId, role: ProjectRoleId, user_key: &str) -> Self {
        self.actors.insert((project, role, user_key.to_string()));
        self
    }
}

#[async_trait]
impl ProjectRoleStore for FakeRoles {
    async fn role_by_id(&self, id: ProjectRoleId) -> AppResult<Option<ProjectRole>> {
        Ok(Some(ProjectRole {
            id,
            name: format!("role-{id}"),
            description: None,
        }))
    }

    async fn is_user_in_role(
        &self,
        user: &ApplicationUser,
        role: ProjectRoleId,
        project: ProjectId,
    ) -> AppResult<bool> {
        Ok(self.actors.contains(&(project, role, user.key.clone())))
    }

    async fn role_members(
        &self,
        role: ProjectRoleId,
        project: ProjectId,
    ) -> AppResult<Vec<ApplicationUser>> {
        Ok(self
            .actors
            .iter()
            .filter(|(p, r, _)| *p == project && *r == role)
            .map(|(_, _, key)| user(key))
            .collect())
    }
}

pub struct StaticProjects(pub Vec<Project>);

#[async_trait]
impl ProjectStore for StaticProjects {
    async fn all_projects(&self) -> AppResult<Vec<Project>> {
        Ok(self.0.clone())
    }

    async fn project_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        Ok(self.0.iter().find(|p| p.id == id).cloned())
    }
}

#[derive(Default)]
pub struct FakeSchemes {
    entities: Vec<SchemeEntity>,
}

impl FakeSchemes {
    pub fn with_grant(
        mut self,
        scheme: SchemeId,
        entity_type: &str,
        parameter: Option<&str>,
        permission: ProjectPermission,
    ) -> Self {
        let id = SchemeEntityId::new(self.entities.len() as i64 + 1);
        self.entities.push(SchemeEntity::new(
            id,
            scheme,
            entity_type,
            parameter.map(str::to_string),
            permission.id(),
        ));
        self
    }
}

#[async_trait]
impl SchemeStore for FakeSchemes {
    async fn permission_schemes(&self, project: &Project) -> AppResult<Vec<Scheme>> {
        Ok(project
            .permission_scheme_id
            .map(|id| Scheme {
                id,
                name: format!("scheme-{id}"),
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

#[derive(Default)]
pub struct FakeLevels {
    levels: HashMap<SecurityLevelId, IssueSecurityLevel>,
    grants: Vec<IssueSecurityLevelPermission>,
    scheme_lookups: AtomicUsize,
}

impl FakeLevels {
    pub fn with_level(mut self, scheme: SchemeId, id: i64, name: Option<&str>) -> Self {
        let id = SecurityLevelId::new(id);
        self.levels.insert(
            id,
            IssueSecurityLevel {
                id,
                name: name.map(str::to_string),
                description: None,
                scheme_id: scheme,
            },
        );
        self
    }

    pub fn with_grant(mut self, scheme: SchemeId, level: i64, ty: &str, parameter: Option<&str>) -> Self {
        let id = SchemeEntityId::new(self.grants.len() as i64 + 1);
        self.grants.push(IssueSecurityLevelPermission::new(
            id,
            scheme,
            SecurityLevelId::new(level),
            ty,
            parameter.map(str::to_string),
        ));
        self
    }

    pub fn scheme_lookups(&self) -> usize {
        self.scheme_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecurityLevelStore for FakeLevels {
    async fn level(&self, id: SecurityLevelId) -> AppResult<Option<IssueSecurityLevel>> {
        Ok(self.levels.get(&id).cloned())
    }

    async fn levels_for_scheme(&self, scheme: SchemeId) -> AppResult<Vec<IssueSecurityLevel>> {
        Ok(self
            .levels
            .values()
            .filter(|l| l.scheme_id == scheme)
            .cloned()
            .collect())
    }

    async fn permissions_for_scheme(
        &self,
        scheme: SchemeId,
    ) -> AppResult<Vec<IssueSecurityLevelPermission>> {
        self.scheme_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .grants
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
            .grants
            .iter()
            .filter(|g| g.security_level_id == level)
            .cloned()
            .collect())
    }
}
