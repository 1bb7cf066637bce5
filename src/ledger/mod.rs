//! Bundle ledger
//!
//! Tracks the books picked for a discounted bundle while a clerk is building
//! it, together with two running totals: the bundle price after discounts and
//! the amount saved. Every mutation adjusts the totals by the changed item's
//! marginal contribution, so reading them never walks the item list.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Result, duplicate_item, index_out_of_range, invalid_discount};

/// A book provisionally placed in a bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleItem {
    isbn: String,
    list_price: Decimal,
    discount: Decimal,
}

impl BundleItem {
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn list_price(&self) -> Decimal {
        self.list_price
    }

    /// Discount as a fraction in `[0, 1]`
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Amount taken off the list price
    pub fn savings(&self) -> Decimal {
        self.list_price * self.discount
    }

    pub fn discounted_price(&self) -> Decimal {
        self.list_price - self.savings()
    }
}

/// Ordered bundle contents with running totals
#[derive(Debug, Clone, Default)]
pub struct BundleLedger {
    items: Vec<BundleItem>,
    total_after_discount: Decimal,
    total_savings: Decimal,
}

impl BundleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a book at full price
    pub fn add_item(&mut self, isbn: impl Into<String>, list_price: Decimal) -> Result<()> {
        let isbn = isbn.into();
        if self.position(&isbn).is_some() {
            return Err(duplicate_item(isbn));
        }

        self.total_after_discount += list_price;
        self.items.push(BundleItem {
            isbn,
            list_price,
            discount: Decimal::ZERO,
        });
        Ok(())
    }

    /// Remove the item at `index`; later items shift down by one
    pub fn remove_item(&mut self, index: usize) -> Result<BundleItem> {
        let item = self
            .items
            .get(index)
            .ok_or_else(|| index_out_of_range(index, self.items.len()))?;

        let savings = item.savings();
        self.total_savings -= savings;
        self.total_after_discount -= item.list_price - savings;
        Ok(self.items.remove(index))
    }

    /// Change the discount fraction of the item at `index`
    pub fn set_discount(&mut self, index: usize, fraction: Decimal) -> Result<()> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or_else(|| index_out_of_range(index, len))?;
        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(invalid_discount(fraction));
        }

        let delta = (fraction - item.discount) * item.list_price;
        self.total_after_discount -= delta;
        self.total_savings += delta;
        item.discount = fraction;
        Ok(())
    }

    /// Drop every item and reset both totals
    pub fn clear(&mut self) {
        self.items.clear();
        self.total_after_discount = Decimal::ZERO;
        self.total_savings = Decimal::ZERO;
    }

    pub fn items(&self) -> &[BundleItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the item with the given ISBN
    pub fn position(&self, isbn: &str) -> Option<usize> {
        self.items.iter().position(|item| item.isbn == isbn)
    }

    pub fn total_after_discount(&self) -> Decimal {
        self.total_after_discount
    }

    pub fn total_savings(&self) -> Decimal {
        self.total_savings
    }

    /// Sum of list prices, computed from the items
    pub fn total_list_price(&self) -> Decimal {
        self.items.iter().map(|item| item.list_price).sum()
    }
}

/// Parse a discount typed by a clerk
///
/// Accepts a fraction (`0.25`) or a percentage (`25%`).
pub fn parse_discount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    let fraction = match trimmed.strip_suffix('%') {
        Some(percent) => {
            Decimal::from_str(percent.trim()).map_err(|_| invalid_discount(trimmed))?
                / Decimal::ONE_HUNDRED
        }
        None => Decimal::from_str(trimmed).map_err(|_| invalid_discount(trimmed))?,
    };

    if fraction < Decimal::ZERO || fraction > Decimal::ONE {
        return Err(invalid_discount(trimmed));
    }
    Ok(fraction.normalize())
}

#[cfg(test)]
mod tests;
