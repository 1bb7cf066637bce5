//! Logged-in clerk session
//!
//! The session is the controller between the terminal front-end and the
//! persistence collaborators. It owns the search filters, the current result
//! rows and, while a bundle is being assembled, the bundle ledger. Ledger
//! changes are applied locally first; saving only clears the ledger once the
//! store confirms the write.

use rust_decimal::Decimal;

use crate::auth::{ClerkId, Credentials};
use crate::error::{
    Result, login_failed, no_row_selected, not_building_bundle, persist_failed,
};
use crate::filter::{DateRange, FilterAction, FilterRangeReconciler, Preset};
use crate::ledger::{BundleItem, BundleLedger};
use crate::store::{
    BookDetails, BookRow, BundleSummary, RequestOutcome, RestockRequest, Store,
};

pub struct ClerkSession<'a, S: Store + ?Sized> {
    store: &'a S,
    clerk: ClerkId,
    filters: FilterRangeReconciler,
    dates: DateRange,
    rows: Vec<BookRow>,
    bundle: Option<BundleLedger>,
}

impl<'a, S: Store + ?Sized> ClerkSession<'a, S> {
    /// Check credentials and open a session
    pub fn login(store: &'a S, credentials: &Credentials) -> Result<Self> {
        if !store.authenticate(credentials.clerk, &credentials.digest)? {
            return Err(login_failed(credentials.clerk));
        }
        tracing::info!(clerk = credentials.clerk, "clerk logged in");
        Ok(Self {
            store,
            clerk: credentials.clerk,
            filters: FilterRangeReconciler::new(),
            dates: DateRange::default(),
            rows: Vec::new(),
            bundle: None,
        })
    }

    pub fn clerk(&self) -> ClerkId {
        self.clerk
    }

    pub fn filters(&self) -> &FilterRangeReconciler {
        &self.filters
    }

    pub fn apply_filter(&mut self, action: FilterAction) {
        tracing::debug!(?action, "filter changed");
        self.filters.apply(action);
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.apply_filter(FilterAction::ApplyPreset(preset));
    }

    pub fn dates(&self) -> &DateRange {
        &self.dates
    }

    pub fn set_dates(&mut self, dates: DateRange) {
        self.dates = dates;
    }

    /// Re-run the search with the current filters
    pub fn search(&mut self) -> Result<&[BookRow]> {
        let bounds = self.filters.effective_bounds();
        self.rows = self.store.search(&bounds, &self.dates)?;
        tracing::info!(rows = self.rows.len(), "{} rows were found", self.rows.len());
        Ok(&self.rows)
    }

    /// Rows from the last search
    pub fn rows(&self) -> &[BookRow] {
        &self.rows
    }

    pub fn select(&self, index: usize) -> Result<&BookRow> {
        self.rows.get(index).ok_or_else(no_row_selected)
    }

    pub fn details(&self, isbn: &str) -> Result<BookDetails> {
        self.store.book_details(isbn)
    }

    /// File, change or (with zero copies) withdraw a restock request
    pub fn fill_request(&self, isbn: &str, quantity: u32) -> Result<RequestOutcome> {
        self.store.fill_request(isbn, quantity, self.clerk)
    }

    /// Requested quantity for a book, if this clerk has asked for it
    pub fn requested_quantity(&self, isbn: &str) -> Result<Option<u32>> {
        Ok(self
            .requests()?
            .into_iter()
            .find(|r| r.isbn == isbn)
            .map(|r| r.quantity))
    }

    pub fn requests(&self) -> Result<Vec<RestockRequest>> {
        self.store.requests(self.clerk)
    }

    /// Begin a new bundle, discarding any unsaved one
    pub fn start_bundle(&mut self) -> &BundleLedger {
        if self.bundle.as_ref().is_some_and(|b| !b.is_empty()) {
            tracing::warn!("discarding unsaved bundle");
        }
        self.bundle.insert(BundleLedger::new())
    }

    /// The bundle under construction, if any
    pub fn bundle(&self) -> Option<&BundleLedger> {
        self.bundle.as_ref()
    }

    fn ledger_mut(&mut self) -> Result<&mut BundleLedger> {
        self.bundle.as_mut().ok_or_else(not_building_bundle)
    }

    /// Add a book at its catalogue price
    pub fn bundle_add(&mut self, isbn: &str) -> Result<Decimal> {
        if self.bundle.is_none() {
            return Err(not_building_bundle());
        }
        let details = self.store.book_details(isbn)?;
        self.ledger_mut()?.add_item(details.isbn, details.price)?;
        Ok(details.price)
    }

    pub fn bundle_remove(&mut self, index: usize) -> Result<BundleItem> {
        self.ledger_mut()?.remove_item(index)
    }

    pub fn bundle_discount(&mut self, index: usize, fraction: Decimal) -> Result<()> {
        self.ledger_mut()?.set_discount(index, fraction)
    }

    /// Persist the bundle; the ledger is only cleared when the store succeeds
    pub fn save_bundle(&mut self, name: &str, comment: &str) -> Result<i64> {
        let ledger = self.bundle.as_ref().ok_or_else(not_building_bundle)?;
        if ledger.is_empty() {
            return Err(persist_failed(
                format!("bundle '{name}'"),
                "a bundle needs at least one book",
            ));
        }

        let id = self
            .store
            .save_bundle(name, comment, self.clerk, ledger.items())?;

        if let Some(mut ledger) = self.bundle.take() {
            ledger.clear();
        }
        Ok(id)
    }

    /// Drop the bundle under construction
    pub fn cancel_bundle(&mut self) {
        if let Some(mut ledger) = self.bundle.take() {
            ledger.clear();
        }
    }

    pub fn bundles(&self) -> Result<Vec<BundleSummary>> {
        self.store.bundles()
    }

    /// End the session, discarding any unsaved bundle
    pub fn logout(mut self) {
        if self.bundle.as_ref().is_some_and(|b| !b.is_empty()) {
            tracing::warn!("discarding unsaved bundle");
        }
        self.cancel_bundle();
        tracing::info!(clerk = self.clerk, "clerk logged out");
    }
}
