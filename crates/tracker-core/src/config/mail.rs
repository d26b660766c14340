//! Outgoing mail configuration.

use serde::{Deserialize, Serialize};

/// SMTP server and header policy for outgoing mail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether an SMTP server is configured. Bulk mail refuses to run without one.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP host name.
    #[serde(default = "default_host")]
    pub host: String,
    /// SMTP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Use implicit TLS (SMTPS) instead of STARTTLS.
    #[serde(default)]
    pub implicit_tls: bool,
    /// Plaintext transport, for local relays and test servers.
    #[serde(default)]
    pub insecure: bool,
    /// SMTP user name.
    #[serde(default)]
    pub username: Option<String>,
    /// SMTP password.
    #[serde(default)]
    pub password: Option<String>,
    /// Envelope sender address.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Identifier of this installation. Its SHA-256 digest is sent in the
    /// fingerprint header so mail loops between instances can be detected.
    /// Empty disables the header.
    #[serde(default)]
    pub instance_id: String,
    /// Drop the `Precedence: bulk` header from outgoing mail.
    #[serde(default)]
    pub suppress_precedence_header: bool,
    /// Maximum number of recipients per message sent by bulk mail.
    #[serde(default = "default_batch_size")]
    pub recipient_batch_size: usize,
    /// SMTP command timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_port(),
            implicit_tls: false,
            insecure: false,
            username: None,
            password: None,
            from_address: default_from(),
            instance_id: String::new(),
            suppress_precedence_header: false,
            recipient_batch_size: default_batch_size(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    25
}

fn default_from() -> String {
    "tracker@localhost".to_string()
}

fn default_batch_size() -> usize {
    100
}

fn default_timeout() -> u64 {
    30
}
