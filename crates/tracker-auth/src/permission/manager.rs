//! Permission scheme evaluation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use tracker_core::result::AppResult;
use tracker_database::store::{ProjectStore, SchemeStore};
use tracker_entity::permission::ProjectPermission;
use tracker_entity::project::Project;
use tracker_entity::user::ApplicationUser;

use super::PermissionChecker;
use crate::security_type::SecurityTypeRegistry;

/// Evaluates project permissions by walking each project's permission
/// schemes and asking the security type of every matching grant.
#[derive(Clone)]
pub struct PermissionManager {
    projects: Arc<dyn ProjectStore>,
    schemes: Arc<dyn SchemeStore>,
    registry: Arc<SecurityTypeRegistry>,
}

impl std::fmt::Debug for PermissionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionManager").finish()
    }
}

impl PermissionManager {
    /// Create a permission manager.
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        schemes: Arc<dyn SchemeStore>,
        registry: Arc<SecurityTypeRegistry>,
    ) -> Self {
        Self {
            projects,
            schemes,
            registry,
        }
    }
}

#[async_trait]
impl PermissionChecker for PermissionManager {
    async fn projects_with_permission(
        &self,
        permission: ProjectPermission,
        user: Option<&ApplicationUser>,
    ) -> AppResult<Vec<Project>> {
        let mut granted = Vec::new();
        for project in self.projects.all_projects().await? {
            if self.has_project_permission(permission, &project, user).await? {
                granted.push(project);
            }
        }
        debug!(
            permission = %permission,
            user = user.map(|u| u.key.as_str()).unwrap_or("anonymous"),
            projects = granted.len(),
            "Resolved projects with permission"
        );
        Ok(granted)
    }

    async fn has_project_permission(
        &self,
        permission: ProjectPermission,
        project: &Project,
        user: Option<&ApplicationUser>,
    ) -> AppResult<bool> {
        for scheme in self.schemes.permission_schemes(project).await? {
            for entity in self.schemes.entities(scheme.id, permission.id()).await? {
                let Some(ty) = self.registry.permission_type(&entity.entity_type) else {
                    warn!(
                        scheme = %scheme.id,
                        entity_type = %entity.entity_type,
                        "Skipping grant with unknown security type"
                    );
                    continue;
                };
                if ty
                    .has_permission_for(project, entity.parameter.as_deref(), user)
                    .await?
                {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}
