//! Per-request reuse of permission queries.

use dashmap::DashMap;
use tracing::trace;

use tracker_core::query::Query;
use tracker_core::result::AppResult;
use tracker_entity::permission::ProjectPermission;
use tracker_entity::user::ApplicationUser;

use super::factory::PermissionQueryFactory;

/// Key: user key (`None` for anonymous) and permission.
type QueryCacheKey = (Option<String>, ProjectPermission);

/// Permission queries built during one request.
///
/// A request may search several times with the same permission. The cache
/// lives in the request's extensions and is dropped with the request, so
/// it never serves a query across a permission change.
#[derive(Debug, Default)]
pub struct RequestQueryCache {
    queries: DashMap<QueryCacheKey, Query>,
}

impl RequestQueryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached query for `user` and `permission`, building it with `factory`
    /// on first use. Failures are not cached.
    pub async fn get_or_build(
        &self,
        factory: &PermissionQueryFactory,
        user: Option<&ApplicationUser>,
        permission: ProjectPermission,
    ) -> AppResult<Query> {
        let key = (user.map(|u| u.key.clone()), permission);
        if let Some(query) = self.queries.get(&key) {
            trace!(permission = %permission, "Permission query served from request cache");
            return Ok(query.clone());
        }

        let query = factory.get_query(user, permission).await?;
        self.queries.insert(key, query.clone());
        Ok(query)
    }

    /// Number of cached queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
