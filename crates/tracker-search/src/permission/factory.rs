//! Permission query factory.
//!
//! The generated query has the shape
//!
//! ```text
//! +(<project clause> <project clause> ...)
//! +(issue_security_level:-1 <level clause> <level clause> ...)
//! ```
//!
//! so an issue matches when some project grant exposes it and it either has
//! no security level or some level grant exposes it. A user with no grants
//! gets an empty boolean query, which matches nothing.

use std::sync::Arc;

use indexmap::IndexSet;
use tracing::{debug, error};

use tracker_auth::{PermissionChecker, SecurityLevelSource, SecurityTypeRegistry};
use tracker_core::error::{AppError, ErrorKind};
use tracker_core::query::{BooleanQuery, Query, fields};
use tracker_core::result::AppResult;
use tracker_database::store::{SchemeStore, SecurityLevelStore};
use tracker_entity::permission::ProjectPermission;
use tracker_entity::project::Project;
use tracker_entity::user::ApplicationUser;

/// Builds permission-scoped search queries.
#[derive(Clone)]
pub struct PermissionQueryFactory {
    permissions: Arc<dyn PermissionChecker>,
    schemes: Arc<dyn SchemeStore>,
    user_levels: Arc<dyn SecurityLevelSource>,
    level_grants: Arc<dyn SecurityLevelStore>,
    registry: Arc<SecurityTypeRegistry>,
}

impl std::fmt::Debug for PermissionQueryFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionQueryFactory").finish()
    }
}

impl PermissionQueryFactory {
    /// Create a factory.
    pub fn new(
        permissions: Arc<dyn PermissionChecker>,
        schemes: Arc<dyn SchemeStore>,
        user_levels: Arc<dyn SecurityLevelSource>,
        level_grants: Arc<dyn SecurityLevelStore>,
        registry: Arc<SecurityTypeRegistry>,
    ) -> Self {
        Self {
            permissions,
            schemes,
            user_levels,
            level_grants,
            registry,
        }
    }

    /// Query restricting a search to the issues `user` holds `permission` on.
    ///
    /// Lookup failures are returned as `Database` errors; callers must not
    /// fall back to an unrestricted search.
    pub async fn get_query(
        &self,
        user: Option<&ApplicationUser>,
        permission: ProjectPermission,
    ) -> AppResult<Query> {
        self.build(user, permission).await.map_err(|e| {
            error!(
                permission = %permission,
                user = user.map(|u| u.key.as_str()).unwrap_or("anonymous"),
                error = %e,
                "Failed to build permission query"
            );
            AppError::with_source(
                ErrorKind::Database,
                format!("Unable to build permission query for {permission}"),
                e,
            )
        })
    }

    async fn build(
        &self,
        user: Option<&ApplicationUser>,
        permission: ProjectPermission,
    ) -> AppResult<Query> {
        let projects = self
            .permissions
            .projects_with_permission(permission, user)
            .await?;
        if projects.is_empty() {
            return Ok(BooleanQuery::new().into());
        }

        let mut project_clauses = IndexSet::new();
        for project in &projects {
            self.collect_project_terms(project, permission, user, &mut project_clauses)
                .await?;
        }
        if project_clauses.is_empty() {
            return Ok(BooleanQuery::new().into());
        }

        let mut level_clauses = IndexSet::new();
        level_clauses.insert(Query::term(
            fields::ISSUE_SECURITY_LEVEL,
            fields::NO_SECURITY_LEVEL,
        ));
        for project in &projects {
            self.collect_security_level_terms(project, user, &mut level_clauses)
                .await?;
        }

        debug!(
            permission = %permission,
            project_clauses = project_clauses.len(),
            level_clauses = level_clauses.len(),
            "Built permission query"
        );

        Ok(BooleanQuery::new()
            .must(BooleanQuery::any_of(project_clauses))
            .must(BooleanQuery::any_of(level_clauses))
            .into())
    }

    /// Add the clauses of every grant of `permission` in the project's
    /// permission schemes that applies to `user`.
    pub async fn collect_project_terms(
        &self,
        project: &Project,
        permission: ProjectPermission,
        user: Option<&ApplicationUser>,
        clauses: &mut IndexSet<Query>,
    ) -> AppResult<()> {
        for scheme in self.schemes.permission_schemes(project).await? {
            for entity in self.schemes.entities(scheme.id, permission.id()).await? {
                let Some(ty) = self.registry.permission_type(&entity.entity_type) else {
                    continue;
                };
                let parameter = entity.parameter.as_deref();
                if !ty.has_permission_for(project, parameter, user).await? {
                    continue;
                }
                if let Some(query) = ty.project_query(user, project, parameter) {
                    clauses.insert(query);
                }
            }
        }
        Ok(())
    }

    /// Add the clauses of every level grant that applies to `user` across
    /// the levels the user holds in `project`.
    pub async fn collect_security_level_terms(
        &self,
        project: &Project,
        user: Option<&ApplicationUser>,
        clauses: &mut IndexSet<Query>,
    ) -> AppResult<()> {
        for level in self.user_levels.users_security_levels(project, user).await? {
            for grant in self.level_grants.permissions_for_level(level.id).await? {
                let Some(ty) = self.registry.issue_security_type(&grant.security_type) else {
                    continue;
                };
                let parameter = grant.parameter.as_deref();
                if !ty.has_permission_for(project, parameter, user).await? {
                    continue;
                }
                if let Some(query) = ty.security_level_query(user, project, &level, parameter) {
                    clauses.insert(query);
                }
            }
        }
        Ok(())
    }
}
