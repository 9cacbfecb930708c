use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::SchemaError;

pub const BRAND_COLUMN: &str = "Brand";
pub const PRODUCT_COLUMN: &str = "Product";
pub const STOCK_COLUMN: &str = "Stock Availability";
pub const PRICE_COLUMN: &str = "Discounted Price";
pub const PACK_COLUMN: &str = "Pack";

/// Header names every stock sheet must carry, in display order.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    BRAND_COLUMN,
    PRODUCT_COLUMN,
    STOCK_COLUMN,
    PRICE_COLUMN,
    PACK_COLUMN,
];

/// Raw sheet value for an in-stock product. The storefront leaves the
/// availability banner empty, which the export renders as `N/A`.
const IN_STOCK_RAW: &str = "N/A";
const OUT_OF_STOCK_RAW: &str = "Currently unavailable";

/// Availability of a product, mapped from the sheet's `Stock Availability`
/// column.
///
/// Anything that is not one of the two known markers lands in
/// [`StockStatus::Other`] with the raw text preserved, so it is counted in a
/// summary's total and reported separately rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    Other(String),
}

impl StockStatus {
    /// Maps a raw availability cell to a status. Surrounding whitespace is
    /// ignored; the comparison is otherwise exact.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            IN_STOCK_RAW => StockStatus::InStock,
            OUT_OF_STOCK_RAW => StockStatus::OutOfStock,
            other => StockStatus::Other(other.to_string()),
        }
    }

    /// The sheet representation of this status.
    #[must_use]
    pub fn as_raw(&self) -> &str {
        match self {
            StockStatus::InStock => IN_STOCK_RAW,
            StockStatus::OutOfStock => OUT_OF_STOCK_RAW,
            StockStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for StockStatus {
    fn from(raw: String) -> Self {
        StockStatus::from_raw(&raw)
    }
}

impl From<StockStatus> for String {
    fn from(status: StockStatus) -> Self {
        status.as_raw().to_string()
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "in stock"),
            StockStatus::OutOfStock => write!(f, "out of stock"),
            StockStatus::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// One product row from the stock sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub brand: String,
    pub product: String,
    pub stock_status: StockStatus,
    /// Price exactly as the sheet displays it, e.g. `"₹120"` or `"99.50"`.
    pub discounted_price: String,
    /// Pack size label, e.g. `"500 g"` or `"2 x 1 L"`.
    pub pack: String,
}

impl ProductRecord {
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock_status == StockStatus::InStock
    }

    #[must_use]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock_status == StockStatus::OutOfStock
    }
}

/// Positions of the required columns within a sheet header.
///
/// Built once per fetch; rows are then converted with
/// [`ColumnIndex::record`], so a schema problem fails the whole load before
/// any record exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    brand: usize,
    product: usize,
    stock: usize,
    price: usize,
    pack: usize,
}

impl ColumnIndex {
    /// Resolves the required columns from a header row. Extra columns are
    /// ignored; header cells are compared after trimming.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::EmptySheet`] if the header has no cells.
    /// - [`SchemaError::DuplicateColumn`] if a non-blank header repeats.
    /// - [`SchemaError::MissingColumns`] listing every absent required column.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self, SchemaError> {
        if header.iter().all(|h| h.as_ref().trim().is_empty()) {
            return Err(SchemaError::EmptySheet);
        }

        let mut seen = HashSet::new();
        for name in header.iter().map(|h| h.as_ref().trim()) {
            if !name.is_empty() && !seen.insert(name) {
                return Err(SchemaError::DuplicateColumn(name.to_string()));
            }
        }

        let position = |column: &str| header.iter().position(|h| h.as_ref().trim() == column);
        let positions = REQUIRED_COLUMNS.map(position);

        match positions {
            [Some(brand), Some(product), Some(stock), Some(price), Some(pack)] => Ok(Self {
                brand,
                product,
                stock,
                price,
                pack,
            }),
            _ => Err(SchemaError::MissingColumns(
                REQUIRED_COLUMNS
                    .iter()
                    .zip(positions)
                    .filter(|(_, pos)| pos.is_none())
                    .map(|(column, _)| (*column).to_string())
                    .collect(),
            )),
        }
    }

    /// Builds a record from one data row. Cells past the end of a short row
    /// read as empty strings. The brand cell is trimmed so it matches the
    /// trimmed names used for selection and watches.
    #[must_use]
    pub fn record<S: AsRef<str>>(&self, row: &[S]) -> ProductRecord {
        let cell = |idx: usize| row.get(idx).map_or("", |c| c.as_ref()).to_string();
        ProductRecord {
            brand: cell(self.brand).trim().to_string(),
            product: cell(self.product),
            stock_status: StockStatus::from_raw(&cell(self.stock)),
            discounted_price: cell(self.price),
            pack: cell(self.pack),
        }
    }
}
