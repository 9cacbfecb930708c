use thiserror::Error;

/// Errors raised while setting up the SMTP mailer.
///
/// Delivery failures are reported per alert as
/// [`stockwatch_core::TransportError`] instead.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid sender address \"{address}\": {reason}")]
    InvalidSender { address: String, reason: String },

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
