use stockwatch_core::SchemaError;
use thiserror::Error;

/// Errors returned while loading the stock table from Google Sheets.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the credentials (401) or denied access (403).
    #[error("access to spreadsheet denied (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("spreadsheet or range not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}: {message}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        message: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Sheets base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The sheet loaded but its header does not match the product layout.
    #[error("sheet schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl SheetsError {
    /// `true` for failures reaching or reading the sheet, as opposed to a
    /// sheet whose layout is wrong.
    #[must_use]
    pub fn is_source_unavailable(&self) -> bool {
        !matches!(self, SheetsError::Schema(_))
    }
}
