use crate::app_config::{AppConfig, Environment, SmtpConfig, SmtpTls};
use crate::watch::ResetPolicy;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional =
        |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.trim().is_empty()) };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        or_default(var, default)
            .parse::<u16>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("STOCKWATCH_ENV", "development"))?;
    let log_level = or_default("STOCKWATCH_LOG_LEVEL", "info");

    let sheet_id = require("STOCKWATCH_SHEET_ID")?;
    let sheet_range = or_default("STOCKWATCH_SHEET_RANGE", "Sheet1");
    let sheets_base_url =
        or_default("STOCKWATCH_SHEETS_BASE_URL", "https://sheets.googleapis.com/");
    let sheets_api_key = optional("STOCKWATCH_SHEETS_API_KEY");
    let sheets_access_token = optional("STOCKWATCH_SHEETS_ACCESS_TOKEN");
    let request_timeout_secs = parse_u64("STOCKWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("STOCKWATCH_USER_AGENT", "stockwatch/0.1 (stock-availability)");

    let smtp = match optional("STOCKWATCH_SMTP_HOST") {
        None => None,
        Some(host) => {
            let tls = parse_smtp_tls(&or_default("STOCKWATCH_SMTP_TLS", "starttls"))?;
            let default_port = match tls {
                SmtpTls::Wrapper => "465",
                SmtpTls::StartTls | SmtpTls::None => "587",
            };
            let port = parse_u16("STOCKWATCH_SMTP_PORT", default_port)?;
            let username = optional("STOCKWATCH_SMTP_USERNAME");
            let password = optional("STOCKWATCH_SMTP_PASSWORD");
            // The login doubles as the sender address unless one is given.
            let from = optional("STOCKWATCH_SMTP_FROM")
                .or_else(|| username.clone())
                .ok_or_else(|| ConfigError::MissingEnvVar("STOCKWATCH_SMTP_FROM".to_string()))?;
            if username.is_some() != password.is_some() {
                return Err(invalid(
                    "STOCKWATCH_SMTP_PASSWORD",
                    "username and password must be set together".to_string(),
                ));
            }
            let timeout_secs = parse_u64("STOCKWATCH_SMTP_TIMEOUT_SECS", "30")?;
            Some(SmtpConfig {
                host,
                port,
                tls,
                from,
                username,
                password,
                timeout_secs,
            })
        }
    };

    let watches_required = optional("STOCKWATCH_WATCHES_PATH").is_some();
    let watches_path =
        PathBuf::from(or_default("STOCKWATCH_WATCHES_PATH", "./config/watches.yaml"));
    let reset_policy = or_default("STOCKWATCH_RESET_POLICY", "on-email-change")
        .parse::<ResetPolicy>()
        .map_err(|reason| invalid("STOCKWATCH_RESET_POLICY", reason))?;

    Ok(AppConfig {
        env,
        log_level,
        sheet_id,
        sheet_range,
        sheets_base_url,
        sheets_api_key,
        sheets_access_token,
        request_timeout_secs,
        user_agent,
        smtp,
        watches_path,
        watches_required,
        reset_policy,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOCKWATCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_smtp_tls(s: &str) -> Result<SmtpTls, ConfigError> {
    match s {
        "starttls" => Ok(SmtpTls::StartTls),
        "wrapper" | "tls" => Ok(SmtpTls::Wrapper),
        "none" => Ok(SmtpTls::None),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOCKWATCH_SMTP_TLS".to_string(),
            reason: format!("expected 'starttls', 'wrapper' or 'none', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
