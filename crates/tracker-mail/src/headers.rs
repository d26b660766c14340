//! Header post-processing applied to every outgoing message.

use sha2::{Digest, Sha256};

use tracker_core::config::mail::MailConfig;

use crate::message::MailMessage;

/// Name of the header carrying this installation's fingerprint.
pub const FINGERPRINT_HEADER: &str = "X-Tracker-Fingerprint";

/// Name of the precedence header.
pub const PRECEDENCE_HEADER: &str = "Precedence";

/// Header rules derived from the mail configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderPolicy {
    /// Hex digest sent in [`FINGERPRINT_HEADER`]; `None` omits the header.
    pub fingerprint: Option<String>,
    /// Drop any `Precedence` header instead of marking mail as bulk.
    pub suppress_precedence_header: bool,
}

impl HeaderPolicy {
    /// Build the policy from configuration.
    pub fn from_config(config: &MailConfig) -> Self {
        let instance_id = config.instance_id.trim();
        Self {
            fingerprint: (!instance_id.is_empty()).then(|| fingerprint(instance_id)),
            suppress_precedence_header: config.suppress_precedence_header,
        }
    }

    /// Apply the policy to `message`.
    ///
    /// - Line breaks in the subject become single spaces.
    /// - Line breaks in header values are removed.
    /// - The fingerprint header is added when configured.
    /// - `Precedence` is removed when suppressed, otherwise set to `bulk`.
    pub fn prepare_headers(&self, message: &mut MailMessage) {
        message.subject = strip_line_breaks(&message.subject);

        for value in message.headers.values_mut() {
            if value.contains(['\r', '\n']) {
                *value = strip_line_breaks(value);
            }
        }

        if let Some(fingerprint) = &self.fingerprint {
            message.set_header(FINGERPRINT_HEADER, fingerprint.clone());
        }

        if self.suppress_precedence_header {
            message.remove_header(PRECEDENCE_HEADER);
        } else {
            message.set_header(PRECEDENCE_HEADER, "bulk");
        }
    }
}

/// SHA-256 hex digest of an instance id.
pub fn fingerprint(instance_id: &str) -> String {
    format!("{:x}", Sha256::digest(instance_id.as_bytes()))
}

/// Replace each run of CR/LF characters with one space.
pub fn strip_line_breaks(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_break = false;
    for c in value.chars() {
        if c == '\r' || c == '\n' {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
        } else {
            out.push(c);
            in_break = false;
        }
    }
    out
}
