//! # tracker-mail
//!
//! Outgoing mail for the tracker.
//!
//! - [`message`]: the transport-independent [`MailMessage`].
//! - [`headers`]: header post-processing applied to every outgoing message.
//! - [`sender`]: the [`MailTransport`] seam and its SMTP implementation.
//! - [`bulk`]: the administrator "send mail to users" operation.

pub mod bulk;
pub mod headers;
pub mod message;
pub mod sender;

pub use bulk::{BulkMailReport, BulkMailRequest, BulkMailService};
pub use headers::HeaderPolicy;
pub use message::{MailMessage, MimeType};
pub use sender::{MailTransport, SmtpMailSender};
