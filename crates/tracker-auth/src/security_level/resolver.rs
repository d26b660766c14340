//! Cached resolution of a user's issue security levels.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, warn};

use tracker_core::config::cache::MemoryCacheConfig;
use tracker_core::result::AppResult;
use tracker_core::types::id::ProjectId;
use tracker_database::store::SecurityLevelStore;
use tracker_entity::project::Project;
use tracker_entity::security::{IssueSecurityLevel, sort_by_name};
use tracker_entity::user::ApplicationUser;

use super::SecurityLevelSource;
use crate::security_type::SecurityTypeRegistry;

/// Cache key: project and user key. Anonymous callers share `None`.
type LevelCacheKey = (ProjectId, Option<String>);

/// Resolves the security levels a user holds per project.
///
/// Results are cached process-wide. Call [`clear`](Self::clear) whenever an
/// issue security scheme, its levels, or its grants change. A result whose
/// load overlapped a `clear` is returned to its caller but never cached.
#[derive(Clone)]
pub struct IssueSecurityLevelResolver {
    levels: Arc<dyn SecurityLevelStore>,
    registry: Arc<SecurityTypeRegistry>,
    cache: Cache<LevelCacheKey, Arc<Vec<IssueSecurityLevel>>>,
    epoch: Arc<AtomicU64>,
}

impl std::fmt::Debug for IssueSecurityLevelResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueSecurityLevelResolver")
            .field("cached_entries", &self.cache.entry_count())
            .finish()
    }
}

impl IssueSecurityLevelResolver {
    /// Create a resolver with a cache sized by `config`.
    pub fn new(
        levels: Arc<dyn SecurityLevelStore>,
        registry: Arc<SecurityTypeRegistry>,
        config: &MemoryCacheConfig,
    ) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .time_to_idle(Duration::from_secs(config.time_to_idle_seconds))
            .build();

        Self {
            levels,
            registry,
            cache,
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Drop every cached result.
    pub fn clear(&self) {
        // Bump before invalidating so in-flight loads see the change.
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate_all();
        debug!("Cleared issue security level cache");
    }

    async fn load(
        &self,
        project: &Project,
        user: Option<&ApplicationUser>,
    ) -> AppResult<Vec<IssueSecurityLevel>> {
        let Some(scheme) = project.issue_security_scheme_id else {
            return Ok(Vec::new());
        };
        // Anonymous callers hold no levels.
        let Some(user) = user else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        let mut levels = Vec::new();
        for grant in self.levels.permissions_for_scheme(scheme).await? {
            if seen.contains(&grant.security_level_id) {
                continue;
            }
            let Some(ty) = self.registry.issue_security_type(&grant.security_type) else {
                continue;
            };
            if !ty
                .has_permission(project, grant.parameter.as_deref(), user)
                .await?
            {
                continue;
            }
            match self.levels.level(grant.security_level_id).await? {
                Some(level) => {
                    seen.insert(grant.security_level_id);
                    levels.push(level);
                }
                None => warn!(
                    level = %grant.security_level_id,
                    scheme = %scheme,
                    "Grant refers to a missing security level"
                ),
            }
        }

        sort_by_name(&mut levels);
        Ok(levels)
    }
}

#[async_trait]
impl SecurityLevelSource for IssueSecurityLevelResolver {
    async fn users_security_levels(
        &self,
        project: &Project,
        user: Option<&ApplicationUser>,
    ) -> AppResult<Vec<IssueSecurityLevel>> {
        let key = (project.id, user.map(|u| u.key.clone()));
        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached.as_ref().clone());
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let levels = self.load(project, user).await?;
        if self.epoch.load(Ordering::SeqCst) == epoch {
            self.cache.insert(key.clone(), Arc::new(levels.clone())).await;
            if self.epoch.load(Ordering::SeqCst) != epoch {
                self.cache.invalidate(&key).await;
            }
        } else {
            debug!(project = %project.id, "Security levels changed during load; not caching");
        }
        Ok(levels)
    }
}
