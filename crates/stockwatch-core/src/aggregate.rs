//! Per-brand stock summaries derived from a loaded product table.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::records::{ProductRecord, StockStatus};

/// Stock counts for one brand, recomputed on every aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandSummary {
    pub brand: String,
    pub total: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
    /// Records whose availability is neither in stock nor out of stock.
    pub other: usize,
    /// Out-of-stock records in sheet order.
    pub out_of_stock_rows: Vec<ProductRecord>,
}

impl BrandSummary {
    /// A summary for a brand with no rows in the table.
    #[must_use]
    pub fn empty(brand: &str) -> Self {
        Self {
            brand: brand.to_string(),
            total: 0,
            in_stock: 0,
            out_of_stock: 0,
            other: 0,
            out_of_stock_rows: Vec::new(),
        }
    }

    fn from_group(brand: &str, rows: &[&ProductRecord]) -> Self {
        let mut summary = Self::empty(brand);
        summary.total = rows.len();
        for record in rows {
            match record.stock_status {
                StockStatus::InStock => summary.in_stock += 1,
                StockStatus::OutOfStock => {
                    summary.out_of_stock += 1;
                    summary.out_of_stock_rows.push((*record).clone());
                }
                StockStatus::Other(_) => summary.other += 1,
            }
        }
        summary
    }

    #[must_use]
    pub fn has_out_of_stock(&self) -> bool {
        self.out_of_stock > 0
    }
}

/// Summarizes `records` for each requested brand.
///
/// Records are grouped by exact brand name with sheet order kept inside
/// each group. A requested brand with no records gets a zero-valued
/// summary. Brands that were not requested are ignored.
pub fn summarize<'a, I>(records: &[ProductRecord], brands: I) -> BTreeMap<String, BrandSummary>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: HashMap<&str, Vec<&ProductRecord>> = HashMap::new();
    for record in records {
        groups.entry(record.brand.as_str()).or_default().push(record);
    }

    brands
        .into_iter()
        .map(|brand| {
            let summary = groups.get(brand).map_or_else(
                || BrandSummary::empty(brand),
                |rows| BrandSummary::from_group(brand, rows),
            );
            (brand.to_string(), summary)
        })
        .collect()
}

/// A brand name with the number of rows it has in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandCount {
    pub brand: String,
    pub rows: usize,
}

/// Unique brands in first-seen order. Blank brand cells are skipped.
#[must_use]
pub fn distinct_brands(records: &[ProductRecord]) -> Vec<BrandCount> {
    let mut order: Vec<BrandCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        if record.brand.trim().is_empty() {
            continue;
        }
        match index.get(record.brand.as_str()) {
            Some(&pos) => order[pos].rows += 1,
            None => {
                index.insert(record.brand.as_str(), order.len());
                order.push(BrandCount {
                    brand: record.brand.clone(),
                    rows: 1,
                });
            }
        }
    }

    order
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
