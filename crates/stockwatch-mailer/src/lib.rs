pub mod error;
pub mod smtp;

pub use error::MailerError;
pub use smtp::SmtpMailer;
