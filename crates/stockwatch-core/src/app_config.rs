use std::path::PathBuf;

use crate::watch::ResetPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTls {
    /// Plain connection upgraded with `STARTTLS` (usually port 587).
    StartTls,
    /// TLS from the first byte (usually port 465).
    Wrapper,
    /// No encryption; only for local relays and test servers.
    None,
}

impl std::fmt::Display for SmtpTls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmtpTls::StartTls => write!(f, "starttls"),
            SmtpTls::Wrapper => write!(f, "wrapper"),
            SmtpTls::None => write!(f, "none"),
        }
    }
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub tls: SmtpTls,
    /// Sender address placed in the `From` header.
    pub from: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("from", &self.from)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub sheet_id: String,
    pub sheet_range: String,
    pub sheets_base_url: String,
    pub sheets_api_key: Option<String>,
    pub sheets_access_token: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// `None` when `STOCKWATCH_SMTP_HOST` is unset; alerts are then disabled.
    pub smtp: Option<SmtpConfig>,
    pub watches_path: PathBuf,
    /// `true` when the watches path was set explicitly, making a missing
    /// file an error.
    pub watches_required: bool,
    pub reset_policy: ResetPolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("sheet_id", &self.sheet_id)
            .field("sheet_range", &self.sheet_range)
            .field("sheets_base_url", &self.sheets_base_url)
            .field(
                "sheets_api_key",
                &self.sheets_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "sheets_access_token",
                &self.sheets_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("smtp", &self.smtp)
            .field("watches_path", &self.watches_path)
            .field("watches_required", &self.watches_required)
            .field("reset_policy", &self.reset_policy)
            .finish()
    }
}
