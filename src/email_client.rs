use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::ExposeSecret;

use crate::{configuration::SmtpCredentials, domain::Email, utils::error_chain_fmt};

/// An outbound notification, ready to hand over to a [`MailTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: Email,
    pub reply_to: Email,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[derive(thiserror::Error)]
pub enum TransportError {
    #[error("invalid mailbox: {0}")]
    InvalidAddress(String),
    #[error("failed to build the message")]
    Build(#[from] lettre::error::Error),
    #[error("SMTP delivery failed")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

impl std::fmt::Debug for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), TransportError>;
}

#[derive(Clone)]
pub struct SmtpEmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpEmailClient {
    /// `secure` selects implicit TLS; otherwise the connection is upgraded with STARTTLS.
    ///
    /// Must be called from within a Tokio runtime: the connection pool spawns its
    /// background task on construction.
    pub fn new(
        host: &str,
        port: u16,
        secure: bool,
        sender: Email,
        credentials: SmtpCredentials,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let builder = if secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        };

        let transport = builder
            .port(port)
            .timeout(Some(timeout))
            .credentials(Credentials::new(
                credentials.username,
                credentials.password.expose_secret().to_owned(),
            ))
            .build();

        Ok(Self {
            transport,
            sender: mailbox(&sender)?,
        })
    }

    fn build_message(&self, notification: &Notification) -> Result<Message, TransportError> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(mailbox(&notification.to)?)
            .reply_to(mailbox(&notification.reply_to)?)
            .subject(notification.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                notification.text_body.clone(),
                notification.html_body.clone(),
            ))?;

        Ok(message)
    }
}

fn mailbox(email: &Email) -> Result<Mailbox, TransportError> {
    email
        .as_ref()
        .parse()
        .map_err(|_| TransportError::InvalidAddress(email.to_string()))
}

#[async_trait]
impl MailTransport for SmtpEmailClient {
    #[tracing::instrument(name = "Sending notification over SMTP", skip(self, notification))]
    async fn send(&self, notification: &Notification) -> Result<(), TransportError> {
        let message = self.build_message(notification)?;
        self.transport.send(message).await?;

        Ok(())
    }
}
