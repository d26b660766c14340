//! Response DTOs.

use serde::{Deserialize, Serialize};

use tracker_core::query::Query;

/// `GET /permission-query` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionQueryResponse {
    /// Permission id.
    pub permission_id: i64,
    /// Permission name, when it is a built-in permission.
    pub permission: Option<String>,
    /// Caller's user key; absent for anonymous callers.
    pub user: Option<String>,
    /// Query tree.
    pub query: Query,
    /// Query in `+field:value` syntax.
    pub query_string: String,
    /// Whether the query matches nothing.
    pub empty: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database status: `"connected"`, `"unavailable"`, or `"not_configured"`.
    pub database: String,
    /// Whether outgoing mail is configured.
    pub mail: bool,
}
