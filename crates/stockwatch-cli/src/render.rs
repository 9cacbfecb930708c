//! Plain-text rendering of the dashboard views.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use stockwatch_core::{
    BrandCount, BrandSummary, NotifyResult, ProductRecord, WatchList, REQUIRED_COLUMNS,
};

/// Rows shown by the raw preview.
const RAW_PREVIEW_ROWS: usize = 3;

/// Left-aligned table with a header rule. Widths count characters, not
/// bytes, so currency symbols line up.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&padded_line(headers.iter().copied(), &widths));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in rows {
        out.push_str(&padded_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

fn padded_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

pub(crate) fn render_brands(brands: &[BrandCount]) -> String {
    if brands.is_empty() {
        return "No brands found in the sheet.\n".to_string();
    }
    let rows: Vec<Vec<String>> = brands
        .iter()
        .map(|b| vec![b.brand.clone(), b.rows.to_string()])
        .collect();
    table(&["Brand", "Products"], &rows)
}

pub(crate) fn render_overview(
    summaries: &BTreeMap<String, BrandSummary>,
    loaded_at: Option<DateTime<Utc>>,
) -> String {
    let mut out = String::new();
    if let Some(at) = loaded_at {
        let _ = writeln!(out, "Data loaded {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    let rows: Vec<Vec<String>> = summaries
        .values()
        .map(|s| {
            vec![
                s.brand.clone(),
                s.total.to_string(),
                s.in_stock.to_string(),
                s.out_of_stock.to_string(),
                s.other.to_string(),
            ]
        })
        .collect();
    out.push_str(&table(
        &["Brand", "Total Products", "In Stock", "Out of Stock", "Other"],
        &rows,
    ));
    for summary in summaries.values().filter(|s| s.total == 0) {
        let _ = writeln!(out, "note: no products found for brand '{}'", summary.brand);
    }
    out
}

pub(crate) fn render_out_of_stock(summary: &BrandSummary) -> String {
    let mut out = format!("Out of stock: {}\n", summary.brand);
    if summary.out_of_stock_rows.is_empty() {
        out.push_str("All products are currently in stock.\n");
        return out;
    }
    let rows: Vec<Vec<String>> = summary
        .out_of_stock_rows
        .iter()
        .map(|r| vec![r.product.clone(), r.pack.clone(), r.discounted_price.clone()])
        .collect();
    out.push_str(&table(&["Product", "Pack", "Discounted Price"], &rows));
    out
}

pub(crate) fn render_products(brand: &str, records: &[&ProductRecord]) -> String {
    let mut out = format!("All products: {brand}\n");
    if records.is_empty() {
        out.push_str("No products.\n");
        return out;
    }
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.product.clone(),
                r.stock_status.as_raw().to_string(),
                r.discounted_price.clone(),
                r.pack.clone(),
            ]
        })
        .collect();
    out.push_str(&table(
        &["Product", "Stock Availability", "Discounted Price", "Pack"],
        &rows,
    ));
    out
}

/// The sheet's column list followed by its first few rows, before any
/// brand filtering.
pub(crate) fn render_raw(columns: &[String], records: &[ProductRecord]) -> String {
    let mut out = if columns.is_empty() {
        format!("Columns: {}\n", REQUIRED_COLUMNS.join(", "))
    } else {
        format!("Columns: {}\n", columns.join(", "))
    };
    if records.is_empty() {
        out.push_str("No rows.\n");
        return out;
    }
    let rows: Vec<Vec<String>> = records
        .iter()
        .take(RAW_PREVIEW_ROWS)
        .map(|r| {
            vec![
                r.brand.clone(),
                r.product.clone(),
                r.stock_status.as_raw().to_string(),
                r.discounted_price.clone(),
                r.pack.clone(),
            ]
        })
        .collect();
    out.push_str(&table(&REQUIRED_COLUMNS, &rows));
    let _ = writeln!(out, "Showing {} of {} rows.", rows.len(), records.len());
    out
}

pub(crate) fn render_watches(watches: &WatchList) -> String {
    if watches.is_empty() {
        return "No brands watched.\n".to_string();
    }
    let rows: Vec<Vec<String>> = watches
        .iter()
        .map(|w| {
            vec![
                w.brand.clone(),
                w.notification_email.clone().unwrap_or_else(|| "-".to_string()),
                if w.already_notified { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    table(&["Brand", "Email", "Notified"], &rows)
}

pub(crate) fn render_notify_results(results: &[(String, NotifyResult)]) -> String {
    if results.is_empty() {
        return "No brands watched; nothing to notify.\n".to_string();
    }
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|(brand, result)| vec![brand.clone(), result.to_string()])
        .collect();
    table(&["Brand", "Alert"], &rows)
}
