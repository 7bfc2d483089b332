//! Outbound mail delivery.

use async_trait::async_trait;
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::{config::MailConfig, message::OutboundMessage};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("delivery task failed: {0}")]
    Task(String),
}

/// Capability to send one message. Failures are reported, never retried.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> Result<(), DispatchError>;
}

/// SMTP delivery through lettre.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, DispatchError> {
        let transport = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection"
            );
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.from_address,
                "SMTP relay initialized with authentication and TLS"
            );
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self { transport })
    }
}

/// Turn an outbound message into a lettre message. A reply-to address that
/// does not parse is dropped so the submission still reaches the mailbox.
pub fn to_lettre(message: &OutboundMessage) -> Result<Message, DispatchError> {
    let mut builder = Message::builder()
        .from(message.from.parse::<Mailbox>()?)
        .to(message.to.parse::<Mailbox>()?)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN);

    if let Some(reply_to) = &message.reply_to {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(error) => {
                tracing::warn!(%reply_to, %error, "ignoring unparseable reply-to address");
            }
        }
    }

    Ok(builder.body(message.text.clone())?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: OutboundMessage) -> Result<(), DispatchError> {
        let email = to_lettre(&message)?;
        let transport = self.transport.clone();

        tracing::info!(to = %message.to, subject = %message.subject, "Sending email");

        tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .map_err(|error| DispatchError::Task(error.to_string()))??;

        Ok(())
    }
}
