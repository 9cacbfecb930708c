//! SMTP delivery of out-of-stock alerts.

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use stockwatch_core::{AlertEmail, MailSender, SmtpConfig, SmtpTls, TransportError};

use crate::error::MailerError;

/// Sends alerts through an SMTP relay. One message per alert; the
/// transport is built once and reused for the whole session.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport described by `config`. No connection is opened
    /// until the first send.
    ///
    /// # Errors
    ///
    /// - [`MailerError::InvalidSender`] if `config.from` is not a mailbox.
    /// - [`MailerError::Smtp`] if TLS parameters for the relay cannot be
    ///   built.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailerError> {
        let from: Mailbox = config.from.parse().map_err(|e: lettre::address::AddressError| {
            MailerError::InvalidSender {
                address: config.from.clone(),
                reason: e.to_string(),
            }
        })?;

        let builder = match config.tls {
            SmtpTls::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            }
            SmtpTls::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?,
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
        };

        let mut builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        tracing::debug!(
            host = %config.host,
            port = config.port,
            tls = %config.tls,
            "SMTP mailer configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Opens a connection and checks that the relay greets us.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Smtp`] if the relay cannot be reached or
    /// rejects the handshake.
    pub async fn test_connection(&self) -> Result<bool, MailerError> {
        Ok(self.transport.test_connection().await?)
    }

    /// Turns an alert into a plain-text message from the configured sender.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidAddress`] for a malformed recipient
    /// and [`TransportError::Message`] if the message cannot be assembled.
    pub fn build_message(&self, mail: &AlertEmail) -> Result<Message, TransportError> {
        let to: Mailbox = mail.to.parse().map_err(|e: lettre::address::AddressError| {
            TransportError::InvalidAddress {
                address: mail.to.clone(),
                reason: e.to_string(),
            }
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(|e| TransportError::Message(e.to_string()))
    }
}

impl MailSender for SmtpMailer {
    async fn send(&self, mail: &AlertEmail) -> Result<(), TransportError> {
        let message = self.build_message(mail)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| TransportError::Rejected(e.to_string()))?;
        tracing::debug!(to = %mail.to, code = %response.code(), "SMTP relay accepted message");
        Ok(())
    }
}
