//! Tests for the bundle ledger

#![allow(clippy::unwrap_used)]

use super::*;
use crate::error::ClerkError;
use proptest::prelude::*;

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn totals(ledger: &BundleLedger) -> (Decimal, Decimal) {
    (ledger.total_after_discount(), ledger.total_savings())
}

#[test]
fn test_add_item_at_full_price() {
    let mut ledger = BundleLedger::new();
    ledger.add_item("ISBN-A", money(3000)).unwrap();

    assert_eq!(totals(&ledger), (money(3000), Decimal::ZERO));
    assert_eq!(ledger.items()[0].discount(), Decimal::ZERO);
}

#[test]
fn test_duplicate_item_leaves_state_unchanged() {
    let mut ledger = BundleLedger::new();
    ledger.add_item("ISBN-A", money(1250)).unwrap();
    ledger.set_discount(0, Decimal::new(2, 1)).unwrap();
    let before = totals(&ledger);

    let err = ledger.add_item("ISBN-A", money(9999)).unwrap_err();

    assert!(matches!(err, ClerkError::DuplicateItem { ref isbn } if isbn == "ISBN-A"));
    assert_eq!(totals(&ledger), before);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.items()[0].list_price(), money(1250));
}

#[test]
fn test_remove_discounted_single_item() {
    let mut ledger = BundleLedger::new();
    ledger.add_item("ISBN-A", money(2000)).unwrap();
    ledger.set_discount(0, Decimal::new(25, 2)).unwrap();
    assert_eq!(totals(&ledger), (money(1500), money(500)));

    let removed = ledger.remove_item(0).unwrap();

    assert_eq!(removed.isbn(), "ISBN-A");
    assert_eq!(totals(&ledger), (Decimal::ZERO, Decimal::ZERO));
    assert!(ledger.is_empty());
}

#[test]
fn test_add_discount_add_remove_scenario() {
    let mut ledger = BundleLedger::new();

    ledger.add_item("ISBN-A", money(3000)).unwrap();
    assert_eq!(totals(&ledger), (money(3000), money(0)));

    ledger.set_discount(0, Decimal::new(10, 2)).unwrap();
    assert_eq!(totals(&ledger), (money(2700), money(300)));

    ledger.add_item("ISBN-B", money(1000)).unwrap();
    assert_eq!(totals(&ledger), (money(3700), money(300)));

    ledger.remove_item(0).unwrap();
    assert_eq!(totals(&ledger), (money(1000), money(0)));
    assert_eq!(ledger.items()[0].isbn(), "ISBN-B");
    assert_eq!(ledger.position("ISBN-B"), Some(0));
}

#[test]
fn test_remove_out_of_range() {
    let mut ledger = BundleLedger::new();
    ledger.add_item("ISBN-A", money(100)).unwrap();

    let err = ledger.remove_item(1).unwrap_err();
    assert!(matches!(err, ClerkError::IndexOutOfRange { index: 1, len: 1 }));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_set_discount_rejects_out_of_range_fraction() {
    let mut ledger = BundleLedger::new();
    ledger.add_item("ISBN-A", money(1000)).unwrap();
    ledger.set_discount(0, Decimal::new(5, 1)).unwrap();
    let before = totals(&ledger);

    let too_big = ledger.set_discount(0, Decimal::new(101, 2)).unwrap_err();
    let negative = ledger.set_discount(0, Decimal::new(-1, 2)).unwrap_err();

    assert!(matches!(too_big, ClerkError::InvalidDiscount { .. }));
    assert!(matches!(negative, ClerkError::InvalidDiscount { .. }));
    assert_eq!(totals(&ledger), before);
    assert_eq!(ledger.items()[0].discount(), Decimal::new(5, 1));
}

#[test]
fn test_set_discount_bad_index_before_bad_fraction() {
    let mut ledger = BundleLedger::new();
    let err = ledger.set_discount(0, Decimal::TWO).unwrap_err();
    assert!(matches!(err, ClerkError::IndexOutOfRange { .. }));
}

#[test]
fn test_full_discount_bounds() {
    let mut ledger = BundleLedger::new();
    ledger.add_item("ISBN-A", money(4200)).unwrap();
    ledger.set_discount(0, Decimal::ONE).unwrap();
    assert_eq!(totals(&ledger), (Decimal::ZERO, money(4200)));
    ledger.set_discount(0, Decimal::ZERO).unwrap();
    assert_eq!(totals(&ledger), (money(4200), Decimal::ZERO));
}

#[test]
fn test_clear_resets_everything() {
    let mut ledger = BundleLedger::new();
    ledger.add_item("ISBN-A", money(1000)).unwrap();
    ledger.add_item("ISBN-B", money(500)).unwrap();
    ledger.set_discount(1, Decimal::new(5, 1)).unwrap();

    ledger.clear();

    assert!(ledger.is_empty());
    assert_eq!(totals(&ledger), (Decimal::ZERO, Decimal::ZERO));
    // usable again after a clear
    ledger.add_item("ISBN-A", money(1000)).unwrap();
    assert_eq!(ledger.total_after_discount(), money(1000));
}

#[test]
fn test_items_view_is_restartable() {
    let mut ledger = BundleLedger::new();
    ledger.add_item("ISBN-A", money(100)).unwrap();
    ledger.add_item("ISBN-B", money(200)).unwrap();

    let first: Vec<&str> = ledger.items().iter().map(BundleItem::isbn).collect();
    let second: Vec<&str> = ledger.items().iter().map(BundleItem::isbn).collect();
    assert_eq!(first, vec!["ISBN-A", "ISBN-B"]);
    assert_eq!(first, second);
}

#[test]
fn test_parse_discount_accepts_fraction_and_percent() {
    assert_eq!(parse_discount("0.25").unwrap(), Decimal::new(25, 2));
    assert_eq!(parse_discount(" 25% ").unwrap(), Decimal::new(25, 2));
    assert_eq!(parse_discount("100%").unwrap(), Decimal::ONE);
    assert_eq!(parse_discount("0").unwrap(), Decimal::ZERO);
}

#[test]
fn test_parse_discount_rejects_garbage() {
    for input in ["", "abc", "1.01", "-0.1", "150%", "%"] {
        assert!(
            matches!(
                parse_discount(input),
                Err(ClerkError::InvalidDiscount { .. })
            ),
            "expected '{input}' to be rejected"
        );
    }
}

#[derive(Debug, Clone)]
enum LedgerOp {
    Add(u8, i64),
    Remove(usize),
    Discount(usize, i64),
}

fn op_strategy() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (0u8..12, 1i64..100_000).prop_map(|(id, cents)| LedgerOp::Add(id, cents)),
        (0usize..12).prop_map(LedgerOp::Remove),
        // includes values outside [0, 1] to exercise rejection
        (0usize..12, -20i64..=120).prop_map(|(idx, pct)| LedgerOp::Discount(idx, pct)),
    ]
}

proptest! {
    #[test]
    fn prop_totals_match_list_prices(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut ledger = BundleLedger::new();
        for op in ops {
            let _ = match op {
                LedgerOp::Add(id, cents) => ledger.add_item(format!("ISBN-{id}"), money(cents)),
                LedgerOp::Remove(idx) => ledger.remove_item(idx).map(|_| ()),
                LedgerOp::Discount(idx, pct) => ledger.set_discount(idx, Decimal::new(pct, 2)),
            };

            let list_total = ledger.total_list_price();
            let diff = ledger.total_after_discount() + ledger.total_savings() - list_total;
            prop_assert!(diff.abs() <= Decimal::new(1, 6));

            let recomputed_savings: Decimal = ledger.items().iter().map(BundleItem::savings).sum();
            prop_assert_eq!(ledger.total_savings(), recomputed_savings);
        }
    }

    #[test]
    fn prop_isbns_stay_unique(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut ledger = BundleLedger::new();
        for op in ops {
            let _ = match op {
                LedgerOp::Add(id, cents) => ledger.add_item(format!("ISBN-{id}"), money(cents)),
                LedgerOp::Remove(idx) => ledger.remove_item(idx).map(|_| ()),
                LedgerOp::Discount(idx, pct) => ledger.set_discount(idx, Decimal::new(pct, 2)),
            };
        }
        let mut isbns: Vec<&str> = ledger.items().iter().map(BundleItem::isbn).collect();
        let len = isbns.len();
        isbns.sort_unstable();
        isbns.dedup();
        prop_assert_eq!(isbns.len(), len);
    }
}
