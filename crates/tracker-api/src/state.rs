//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tracker_auth::{IssueSecurityLevelResolver, PermissionManager, SecurityTypeRegistry};
use tracker_core::config::AppConfig;
use tracker_database::connection::DatabasePool;
use tracker_database::store::Stores;
use tracker_mail::{BulkMailService, MailTransport};
use tracker_search::PermissionQueryFactory;
use tracker_service::{AuditEventHandler, AuditingManager};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Database pool, absent when running against in-memory stores
    pub database: Option<DatabasePool>,
    /// Store trait objects
    pub stores: Stores,

    // ── Permissions ──────────────────────────────────────────
    /// Issue security level resolver (process-wide cache)
    pub security_levels: IssueSecurityLevelResolver,
    /// Permission-scoped query factory
    pub query_factory: Arc<PermissionQueryFactory>,

    // ── Services ─────────────────────────────────────────────
    /// Audit log
    pub auditing: AuditingManager,
    /// Scheme event auditing
    pub audit_events: AuditEventHandler,
    /// Administrator bulk mail
    pub bulk_mail: Arc<BulkMailService>,
}

impl AppState {
    /// Wire every service on top of `stores`.
    ///
    /// `transport` is `None` when no mail server is configured.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        transport: Option<Arc<dyn MailTransport>>,
        database: Option<DatabasePool>,
    ) -> Self {
        let registry = Arc::new(SecurityTypeRegistry::standard(
            Arc::clone(&stores.directory),
            Arc::clone(&stores.roles),
        ));

        let permission_manager = Arc::new(PermissionManager::new(
            Arc::clone(&stores.projects),
            Arc::clone(&stores.schemes),
            Arc::clone(&registry),
        ));

        let security_levels = IssueSecurityLevelResolver::new(
            Arc::clone(&stores.security_levels),
            Arc::clone(&registry),
            &config.cache.security_levels,
        );

        let query_factory = Arc::new(PermissionQueryFactory::new(
            permission_manager,
            Arc::clone(&stores.schemes),
            Arc::new(security_levels.clone()),
            Arc::clone(&stores.security_levels),
            registry,
        ));

        let auditing = AuditingManager::new(Arc::clone(&stores.audit));
        let audit_events = AuditEventHandler::new(auditing.clone(), Some(security_levels.clone()));

        let bulk_mail = Arc::new(BulkMailService::new(
            Arc::clone(&stores.directory),
            Arc::clone(&stores.roles),
            transport,
            config.mail.recipient_batch_size,
        ));

        Self {
            config: Arc::new(config),
            database,
            stores,
            security_levels,
            query_factory,
            auditing,
            audit_events,
            bulk_mail,
        }
    }
}
