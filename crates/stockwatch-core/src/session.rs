use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::aggregate::{distinct_brands, summarize, BrandCount, BrandSummary};
use crate::notify::{maybe_notify, MailSender, NotifyResult};
use crate::records::ProductRecord;
use crate::watch::WatchList;
use crate::CoreError;

/// Maximum number of brands shown side by side.
pub const MAX_SELECTED_BRANDS: usize = 10;

/// State of one dashboard session: the last loaded table, the brands being
/// displayed, and the watch list with its notification flags.
///
/// A session is owned by whatever drives the pipeline and passed explicitly;
/// nothing here is global.
#[derive(Debug, Default)]
pub struct Session {
    watches: WatchList,
    selection: Vec<String>,
    columns: Vec<String>,
    records: Option<Vec<ProductRecord>>,
    loaded_at: Option<DateTime<Utc>>,
}

impl Session {
    #[must_use]
    pub fn new(watches: WatchList) -> Self {
        Self {
            watches,
            ..Self::default()
        }
    }

    /// Replaces the loaded table. Selection and watches are kept.
    pub fn load(&mut self, records: Vec<ProductRecord>) {
        self.load_with_columns(Vec::new(), records);
    }

    /// Like [`Session::load`], also keeping the sheet's header for the raw
    /// preview.
    pub fn load_with_columns(&mut self, columns: Vec<String>, records: Vec<ProductRecord>) {
        tracing::info!(
            rows = records.len(),
            columns = columns.len(),
            "stock table loaded into session"
        );
        self.columns = columns;
        self.records = Some(records);
        self.loaded_at = Some(Utc::now());
    }

    /// Header of the last loaded sheet; empty if it was loaded without one.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn records(&self) -> Option<&[ProductRecord]> {
        self.records.as_deref()
    }

    #[must_use]
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Brands present in the loaded table.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotLoaded`] before the first load.
    pub fn brands(&self) -> Result<Vec<BrandCount>, CoreError> {
        self.records
            .as_deref()
            .map(distinct_brands)
            .ok_or(CoreError::NotLoaded)
    }

    /// Sets the displayed brands. Blank names are dropped and repeats
    /// collapse to their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TooManyBrands`] when more than
    /// [`MAX_SELECTED_BRANDS`] distinct brands are requested; the previous
    /// selection is kept.
    pub fn select<I, S>(&mut self, brands: I) -> Result<(), CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection: Vec<String> = Vec::new();
        for brand in brands {
            let brand = brand.as_ref().trim();
            if !brand.is_empty() && !selection.iter().any(|b| b == brand) {
                selection.push(brand.to_string());
            }
        }
        if selection.len() > MAX_SELECTED_BRANDS {
            return Err(CoreError::TooManyBrands {
                max: MAX_SELECTED_BRANDS,
                requested: selection.len(),
            });
        }
        self.selection = selection;
        Ok(())
    }

    #[must_use]
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    #[must_use]
    pub fn watches(&self) -> &WatchList {
        &self.watches
    }

    pub fn watches_mut(&mut self) -> &mut WatchList {
        &mut self.watches
    }

    /// Summaries for the selected brands, keyed by brand.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotLoaded`] before the first load.
    pub fn summaries(&self) -> Result<BTreeMap<String, BrandSummary>, CoreError> {
        let records = self.records.as_deref().ok_or(CoreError::NotLoaded)?;
        Ok(summarize(records, self.selection.iter().map(String::as_str)))
    }

    /// Records of one brand in sheet order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotLoaded`] before the first load.
    pub fn brand_records(&self, brand: &str) -> Result<Vec<&ProductRecord>, CoreError> {
        let records = self.records.as_deref().ok_or(CoreError::NotLoaded)?;
        Ok(records.iter().filter(|r| r.brand == brand).collect())
    }

    /// Runs the notifier for every watched brand against the loaded table,
    /// one send at a time, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotLoaded`] before the first load. Delivery
    /// failures are reported per brand in the result, not as an error.
    pub async fn notify_watched<S: MailSender>(
        &mut self,
        sender: &S,
    ) -> Result<Vec<(String, NotifyResult)>, CoreError> {
        let records = self.records.as_deref().ok_or(CoreError::NotLoaded)?;
        let mut summaries = summarize(records, self.watches.iter().map(|w| w.brand.as_str()));

        let mut results = Vec::with_capacity(self.watches.len());
        for watch in self.watches.iter_mut() {
            let summary = summaries
                .remove(&watch.brand)
                .unwrap_or_else(|| BrandSummary::empty(&watch.brand));
            let result = maybe_notify(&summary, watch, sender).await;
            results.push((watch.brand.clone(), result));
        }
        Ok(results)
    }

    /// Ends the session: drops the table, the selection and every watch.
    pub fn clear(&mut self) {
        self.watches.clear();
        self.selection.clear();
        self.columns.clear();
        self.records = None;
        self.loaded_at = None;
    }
}
