//! Mail transport seam and its SMTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::{ContentType, HeaderName, HeaderValue};
use lettre::message::{Mailbox, MessageBuilder};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use tracker_core::config::mail::MailConfig;
use tracker_core::error::{AppError, ErrorKind};
use tracker_core::result::AppResult;

use crate::headers::HeaderPolicy;
use crate::message::{MailMessage, MimeType};

/// Delivers prepared messages.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one message. Header post-processing is the transport's job.
    async fn send(&self, message: MailMessage) -> AppResult<()>;
}

/// SMTP delivery through `lettre`.
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    policy: HeaderPolicy,
}

impl std::fmt::Debug for SmtpMailSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailSender")
            .field("from_address", &self.from_address)
            .field("policy", &self.policy)
            .finish()
    }
}

impl SmtpMailSender {
    /// Build a sender from configuration. Does not connect.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let builder = if config.insecure {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        } else if config.implicit_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid SMTP relay '{}': {e}", config.host),
                    e,
                )
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid SMTP relay '{}': {e}", config.host),
                    e,
                )
            })?
        };

        let mut builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        tracing::info!(
            host = %config.host,
            port = config.port,
            implicit_tls = config.implicit_tls,
            insecure = config.insecure,
            "SMTP transport configured"
        );

        Ok(Self {
            transport: builder.build(),
            from_address: config.from_address.clone(),
            policy: HeaderPolicy::from_config(config),
        })
    }

    /// Render a [`MailMessage`] into a `lettre` message after applying
    /// the header policy.
    pub fn build_message(&self, mut message: MailMessage) -> AppResult<Message> {
        self.policy.prepare_headers(&mut message);

        let from_address = message.from.as_deref().unwrap_or(&self.from_address);
        let from = mailbox(message.from_name.as_deref(), from_address)?;

        let mut builder: MessageBuilder = Message::builder().from(from);
        if let Some(reply_to) = &message.reply_to {
            builder = builder.reply_to(mailbox(None, reply_to)?);
        }
        for address in &message.to {
            builder = builder.to(mailbox(None, address)?);
        }
        for address in &message.cc {
            builder = builder.cc(mailbox(None, address)?);
        }
        for address in &message.bcc {
            builder = builder.bcc(mailbox(None, address)?);
        }

        builder = builder.subject(message.subject.clone()).header(match message.mime_type {
            MimeType::Text => ContentType::TEXT_PLAIN,
            MimeType::Html => ContentType::TEXT_HTML,
        });

        for (name, value) in &message.headers {
            let name = HeaderName::new_from_ascii(name.clone()).map_err(|e| {
                AppError::with_source(ErrorKind::Validation, format!("Invalid header name '{name}'"), e)
            })?;
            builder = builder.raw_header(HeaderValue::new(name, value.clone()));
        }

        builder.body(message.body).map_err(|e| {
            AppError::with_source(ErrorKind::Validation, format!("Invalid message: {e}"), e)
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailSender {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        let recipients = message.recipient_count();
        let email = self.build_message(message)?;

        self.transport.send(email).await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, format!("SMTP delivery failed: {e}"), e)
        })?;

        tracing::debug!(recipients, "Mail delivered");
        Ok(())
    }
}

fn mailbox(name: Option<&str>, address: &str) -> AppResult<Mailbox> {
    let address = address.parse().map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Invalid email address '{address}'"),
            e,
        )
    })?;
    Ok(Mailbox::new(name.map(str::to_string), address))
}
