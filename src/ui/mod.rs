//! Presentation layer
//!
//! This module handles:
//! - Money and discount formatting (two fractional digits, percentages)
//! - Rendering search rows, book details, bundles and requests as text or JSON
//! - One-line summaries of the filter state
//!
//! Everything here only reads from the session and store types; no state
//! lives in the presentation layer.

pub mod formatter;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::filter::{FilterRangeReconciler, Metric, RangePair};

pub use formatter::{DisplayFormatter, TextFormatter, formatter_for};

/// Money with two fractional digits, rounding halves away from zero
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Discount fraction as a percentage, without trailing zeros
pub fn format_discount(fraction: Decimal) -> String {
    let percent = (fraction * Decimal::ONE_HUNDRED).normalize();
    format!("{percent}%")
}

fn describe_pair(metric: Metric, pair: &RangePair) -> String {
    let (from, to) = pair.effective();
    match (pair.lower_active(), pair.upper_active()) {
        (false, false) => format!("{metric}: any"),
        (true, false) => format!("{metric}: at least {from}"),
        (false, true) => format!("{metric}: at most {to}"),
        (true, true) => format!("{metric}: {from}..={to}"),
    }
}

/// Short description of the active filters, e.g. `trending | bought: at least 15 | in stock: at most 10`
pub fn filter_summary(filters: &FilterRangeReconciler) -> String {
    format!(
        "{} | {} | {}",
        filters.preset(),
        describe_pair(Metric::Bought, filters.pair(Metric::Bought)),
        describe_pair(Metric::Stock, filters.pair(Metric::Stock)),
    )
}
