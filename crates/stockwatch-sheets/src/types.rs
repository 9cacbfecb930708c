//! Google Sheets API v4 response types for `spreadsheets.values.get`.
//!
//! ### `values`
//! Row-major (`majorDimension=ROWS`). Omitted entirely when the range is
//! empty. Trailing empty cells of a row and trailing empty rows are dropped
//! by the API, so rows can be shorter than the header.
//!
//! ### Cell types
//! With the default `FORMATTED_VALUE` render option every cell is a JSON
//! string holding what the sheet displays. Numbers and booleans only
//! appear with other render options; they are still accepted.
//!
//! ### Errors
//! Non-2xx responses carry `{"error": {"code", "message", "status"}}`.

use serde::Deserialize;

/// Body of `GET /v4/spreadsheets/{id}/values/{range}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
