//! HTTP client for the Google Sheets `values` endpoint.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use stockwatch_core::AppConfig;

use crate::error::SheetsError;
use crate::normalize::{table_from_values, SheetTable};
use crate::types::{ApiErrorEnvelope, ValueRange};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

/// Credential attached to every Sheets request.
///
/// Minting OAuth tokens (service-account JWT exchange) is left to the
/// caller; this client only presents what it is given.
#[derive(Clone)]
pub enum SheetsAuth {
    /// `?key=` query parameter; works for sheets shared by link.
    ApiKey(String),
    /// `Authorization: Bearer` header.
    AccessToken(String),
    /// No credential; only useful against a mock server.
    Anonymous,
}

impl std::fmt::Debug for SheetsAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsAuth::ApiKey(_) => write!(f, "ApiKey([redacted])"),
            SheetsAuth::AccessToken(_) => write!(f, "AccessToken([redacted])"),
            SheetsAuth::Anonymous => write!(f, "Anonymous"),
        }
    }
}

/// Client for reading a stock sheet.
///
/// Every call goes to the network; nothing is cached between fetches.
pub struct SheetsClient {
    client: Client,
    base_url: Url,
    auth: SheetsAuth,
}

impl SheetsClient {
    /// Creates a client pointed at the production Sheets API.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(auth: SheetsAuth, timeout_secs: u64, user_agent: &str) -> Result<Self, SheetsError> {
        Self::with_base_url(DEFAULT_BASE_URL, auth, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SheetsError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        auth: SheetsAuth,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so joined paths append instead of
        // replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SheetsError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SheetsError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Builds a client from application config. An access token wins over
    /// an API key when both are set.
    ///
    /// # Errors
    ///
    /// See [`SheetsClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SheetsError> {
        let auth = match (&config.sheets_access_token, &config.sheets_api_key) {
            (Some(token), _) => SheetsAuth::AccessToken(token.clone()),
            (None, Some(key)) => SheetsAuth::ApiKey(key.clone()),
            (None, None) => {
                tracing::warn!("no Sheets credential configured; requests will be anonymous");
                SheetsAuth::Anonymous
            }
        };
        Self::with_base_url(
            &config.sheets_base_url,
            auth,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches `range` of spreadsheet `sheet_id` and converts it into
    /// product records, keeping the header for previews.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Unauthorized`] on HTTP 401/403.
    /// - [`SheetsError::NotFound`] on HTTP 404.
    /// - [`SheetsError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`SheetsError::Http`] on network or TLS failure.
    /// - [`SheetsError::Deserialize`] if the body is not a value range.
    /// - [`SheetsError::Schema`] if the header lacks a required column.
    pub async fn fetch_table(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<SheetTable, SheetsError> {
        let values = self.fetch_values(sheet_id, range).await?;
        let table = table_from_values(&values)?;
        tracing::info!(
            sheet_id,
            range,
            rows = table.records.len(),
            columns = table.columns.len(),
            "stock table fetched"
        );
        Ok(table)
    }

    /// Fetches the raw cell values of `range`.
    ///
    /// # Errors
    ///
    /// Same as [`SheetsClient::fetch_table`] minus schema validation.
    pub async fn fetch_values(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<ValueRange, SheetsError> {
        let url = self.values_url(sheet_id, range);
        tracing::debug!(sheet_id, range, "requesting sheet values");

        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let SheetsAuth::AccessToken(token) = &self.auth {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SheetsError::Unauthorized {
                    status: status.as_u16(),
                    message,
                },
                StatusCode::NOT_FOUND => SheetsError::NotFound {
                    url: redact_key(&url),
                },
                _ => SheetsError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: redact_key(&url),
                    message,
                },
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<ValueRange>(&body).map_err(|e| SheetsError::Deserialize {
            context: format!("values of {sheet_id}!{range}"),
            source: e,
        })
    }

    /// Builds `{base}/v4/spreadsheets/{id}/values/{range}` with path
    /// segments percent-encoded.
    fn values_url(&self, sheet_id: &str, range: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v4", "spreadsheets", sheet_id, "values", range]);
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("majorDimension", "ROWS");
            pairs.append_pair("valueRenderOption", "FORMATTED_VALUE");
            if let SheetsAuth::ApiKey(key) = &self.auth {
                pairs.append_pair("key", key);
            }
        }
        url
    }
}

/// Pulls `error.message` out of a Google API error body, falling back to
/// the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Strips the API key from a URL before it lands in an error message.
fn redact_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "[redacted]".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
