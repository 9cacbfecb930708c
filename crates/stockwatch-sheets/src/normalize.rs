//! Conversion from a raw [`ValueRange`] into a [`SheetTable`] of validated
//! [`stockwatch_core::ProductRecord`]s.
//!
//! The first row is the header. Data rows shorter than the header read as
//! empty cells, rows with only blank cells are skipped, and extra columns
//! are ignored. Column validation happens before any row is converted, so a
//! load produces either every record or a [`SchemaError`].

use serde_json::Value;
use stockwatch_core::{ColumnIndex, ProductRecord, SchemaError};

use crate::types::ValueRange;

/// A loaded sheet: its header as the sheet shows it plus the converted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTable {
    /// Non-blank header cells, trimmed, in sheet order. Includes columns the
    /// product layout does not use.
    pub columns: Vec<String>,
    pub records: Vec<ProductRecord>,
}

/// Converts a fetched range into a table of product records.
///
/// # Errors
///
/// Returns [`SchemaError`] if the range is empty or its header lacks a
/// required column.
pub fn table_from_values(range: &ValueRange) -> Result<SheetTable, SchemaError> {
    let mut rows = range.values.iter();
    let header: Vec<String> = rows
        .next()
        .ok_or(SchemaError::EmptySheet)?
        .iter()
        .map(cell_text)
        .collect();
    let index = ColumnIndex::from_header(&header)?;

    let records = rows
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(|c| !c.trim().is_empty()))
        .map(|cells| index.record(&cells))
        .collect();

    Ok(SheetTable {
        columns: header
            .iter()
            .map(|h| h.trim())
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect(),
        records,
    })
}

/// Renders one cell as the text the sheet would show.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
