//! Persistence collaborators
//!
//! The clerk session only talks to the database through the traits in this
//! module. [`SqliteStore`] implements all of them on a single connection that
//! is opened once and passed to whoever needs it.

pub mod schema;
pub mod sqlite;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::auth::{ClerkId, PasswordDigest};
use crate::error::Result;
use crate::filter::{DateRange, EffectiveQueryBounds};
use crate::ledger::BundleItem;

pub use sqlite::SqliteStore;

/// One search result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRow {
    pub isbn: String,
    /// Purchases recorded inside the searched date window
    pub sold_count: i64,
    /// Copies in stock
    pub quantity: i64,
}

/// Everything shown about a single book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetails {
    pub isbn: String,
    pub title: String,
    pub price: Decimal,
    pub quantity: i64,
    pub year: Option<i32>,
    pub publisher: Option<String>,
    pub authors: Vec<String>,
}

/// A clerk's pending restock request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestockRequest {
    pub isbn: String,
    pub title: String,
    pub clerk: ClerkId,
    pub quantity: u32,
}

/// What a request write did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestOutcome {
    Inserted,
    Updated,
    Removed,
    /// Zero copies requested and no request on file
    Unchanged,
}

/// A saved bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleSummary {
    pub id: i64,
    pub name: String,
    pub comment: String,
    pub clerk: ClerkId,
    pub item_count: i64,
}

/// Stock search over purchase history
pub trait BookQuery {
    fn search(&self, bounds: &EffectiveQueryBounds, dates: &DateRange) -> Result<Vec<BookRow>>;
}

/// Book detail lookups
pub trait BookCatalog {
    /// Fails with `BookNotFound` for an unknown ISBN
    fn book_details(&self, isbn: &str) -> Result<BookDetails>;
}

/// Restock requests
pub trait RequestStore {
    /// Insert, update or (for `quantity == 0`) delete the clerk's request for a book
    fn fill_request(&self, isbn: &str, quantity: u32, clerk: ClerkId) -> Result<RequestOutcome>;

    /// Requests filed by a clerk, by ISBN
    fn requests(&self, clerk: ClerkId) -> Result<Vec<RestockRequest>>;
}

/// Bundle persistence
pub trait BundleStore {
    /// Store a bundle and all of its memberships, or nothing at all
    fn save_bundle(
        &self,
        name: &str,
        comment: &str,
        clerk: ClerkId,
        items: &[BundleItem],
    ) -> Result<i64>;

    fn bundles(&self) -> Result<Vec<BundleSummary>>;
}

/// Credential check
pub trait Authenticator {
    fn authenticate(&self, clerk: ClerkId, digest: &PasswordDigest) -> Result<bool>;
}

/// Every collaborator a clerk session needs
pub trait Store: BookQuery + BookCatalog + RequestStore + BundleStore + Authenticator {}

impl<T> Store for T where T: BookQuery + BookCatalog + RequestStore + BundleStore + Authenticator {}
