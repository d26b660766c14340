//! Transport-independent mail message.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeType {
    /// `text/plain`.
    Text,
    /// `text/html`.
    Html,
}

impl MimeType {
    /// Short form used in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
        }
    }

    /// Full content type.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Html => "text/html; charset=utf-8",
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MimeType {
    type Err = tracker_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "text/plain" => Ok(Self::Text),
            "html" | "text/html" => Ok(Self::Html),
            _ => Err(tracker_core::AppError::validation(format!(
                "Invalid message type: '{s}'. Expected one of: text, html"
            ))),
        }
    }
}

/// An outgoing message before it is handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    /// Sender address. `None` uses the configured default sender.
    pub from: Option<String>,
    /// Display name for the sender.
    pub from_name: Option<String>,
    /// Primary recipients.
    pub to: Vec<String>,
    /// Carbon-copy recipients.
    pub cc: Vec<String>,
    /// Blind carbon-copy recipients.
    pub bcc: Vec<String>,
    /// Reply-To address.
    pub reply_to: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Body.
    pub body: String,
    /// Body format.
    pub mime_type: MimeType,
    /// Additional headers, in insertion order. Names are matched
    /// case-insensitively by [`header`](Self::header).
    pub headers: IndexMap<String, String>,
}

impl MailMessage {
    /// Create a message with a subject and body and no recipients.
    pub fn new(subject: impl Into<String>, body: impl Into<String>, mime_type: MimeType) -> Self {
        Self {
            from: None,
            from_name: None,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            reply_to: None,
            subject: subject.into(),
            body: body.into(),
            mime_type,
            headers: IndexMap::new(),
        }
    }

    /// Set the primary recipients.
    pub fn to(mut self, recipients: impl IntoIterator<Item = String>) -> Self {
        self.to = recipients.into_iter().collect();
        self
    }

    /// Set the blind-copy recipients.
    pub fn bcc(mut self, recipients: impl IntoIterator<Item = String>) -> Self {
        self.bcc = recipients.into_iter().collect();
        self
    }

    /// Set the Reply-To address.
    pub fn reply_to(mut self, address: Option<String>) -> Self {
        self.reply_to = address;
        self
    }

    /// Set the sender display name.
    pub fn from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    /// Value of a header, looked up case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing header with the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove_header(&name);
        self.headers.insert(name, value.into());
    }

    /// Remove a header by case-insensitive name.
    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    }

    /// Total number of envelope recipients.
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_case_insensitive() {
        let mut message = MailMessage::new("s", "b", MimeType::Text);
        message.set_header("Precedence", "list");
        message.set_header("precedence", "bulk");
        assert_eq!(message.headers.len(), 1);
        assert_eq!(message.header("PRECEDENCE"), Some("bulk"));

        message.remove_header("PreCedence");
        assert!(message.header("precedence").is_none());
    }

    #[test]
    fn test_json_keeps_header_order() {
        let mut message = MailMessage::new("s", "b", MimeType::Html);
        message.set_header("X-Tracker-Fingerprint", "abc");
        message.set_header("Precedence", "bulk");
        message.set_header("Auto-Submitted", "auto-generated");

        let json = serde_json::to_string(&message).unwrap();
        let decoded: MailMessage = serde_json::from_str(&json).unwrap();
        let names: Vec<_> = decoded.headers.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["X-Tracker-Fingerprint", "Precedence", "Auto-Submitted"]);
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_mime_type_parse() {
        assert_eq!("html".parse::<MimeType>().unwrap(), MimeType::Html);
        assert_eq!("text/plain".parse::<MimeType>().unwrap(), MimeType::Text);
        assert!("rtf".parse::<MimeType>().is_err());
    }
}
