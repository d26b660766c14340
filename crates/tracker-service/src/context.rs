//! Request context carrying the acting user and request origin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tracker_entity::user::ApplicationUser;

/// Context for the current request.
///
/// Built by the API layer and passed into service methods so that every
/// operation knows *who* is acting and from *where*.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user; `None` for anonymous requests.
    pub user: Option<ApplicationUser>,
    /// IP address of the request origin.
    pub remote_address: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: Option<ApplicationUser>, remote_address: Option<String>) -> Self {
        Self {
            user,
            remote_address,
            request_time: Utc::now(),
        }
    }

    /// Key of the acting user, if any.
    pub fn user_key(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.key.as_str())
    }
}
