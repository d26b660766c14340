//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user known to the tracker's user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ApplicationUser {
    /// Stable user key. Survives renames and is what index documents store.
    pub key: String,
    /// Login name.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Email address.
    pub email_address: Option<String>,
    /// Inactive users keep their history but receive no mail and cannot log in.
    pub active: bool,
}

impl ApplicationUser {
    /// Convenience constructor for an active user whose key equals its username.
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            key: username.clone(),
            username,
            display_name: display_name.into(),
            email_address: None,
            active: true,
        }
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email_address = Some(email.into());
        self
    }

    /// Mark the user inactive.
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Name used in `From:` headers, falling back to the username.
    pub fn mail_display_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}
