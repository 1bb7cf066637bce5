//! Formatters for command output
//!
//! Text output is meant for a clerk at a terminal; JSON output is meant for
//! scripts. Both render the same data through [`DisplayFormatter`].

use console::Style;
use serde::Serialize;

use crate::error::Result;
use crate::ledger::BundleLedger;
use crate::store::{BookDetails, BookRow, BundleSummary, RestockRequest};

use super::{format_discount, format_money};

macro_rules! push_opt_field {
    ($out:expr, $label:expr, $value:expr) => {
        if let Some(ref v) = $value {
            $out.push_str(&format!("{} {}\n", Style::new().bold().apply_to($label), v));
        }
    };
}

/// Output strategy shared by all commands
pub trait DisplayFormatter {
    /// Search results, followed by the row count
    fn rows(&self, rows: &[BookRow]) -> Result<String>;

    /// Book details, with this clerk's pending request if there is one
    fn details(&self, book: &BookDetails, requested: Option<u32>) -> Result<String>;

    /// Bundle contents and totals
    fn ledger(&self, ledger: &BundleLedger) -> Result<String>;

    fn requests(&self, requests: &[RestockRequest]) -> Result<String>;

    fn bundles(&self, bundles: &[BundleSummary]) -> Result<String>;
}

/// Pick the formatter for a `--json` flag
pub fn formatter_for(json: bool) -> Box<dyn DisplayFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TextFormatter)
    }
}

/// Human readable tables
pub struct TextFormatter;

fn header(text: &str) -> String {
    format!("{}\n", Style::new().bold().apply_to(text))
}

fn rows_found(count: usize) -> String {
    match count {
        1 => "1 row was found.".to_string(),
        n => format!("{n} rows were found."),
    }
}

impl DisplayFormatter for TextFormatter {
    fn rows(&self, rows: &[BookRow]) -> Result<String> {
        let mut out = String::new();
        if !rows.is_empty() {
            out.push_str(&header(&format!(
                "{:>3}  {:<20} {:>6} {:>9}",
                "#", "ISBN", "Bought", "In stock"
            )));
            for (i, row) in rows.iter().enumerate() {
                out.push_str(&format!(
                    "{:>3}  {:<20} {:>6} {:>9}\n",
                    i, row.isbn, row.sold_count, row.quantity
                ));
            }
        }
        out.push_str(&rows_found(rows.len()));
        out.push('\n');
        Ok(out)
    }

    fn details(&self, book: &BookDetails, requested: Option<u32>) -> Result<String> {
        let mut out = String::new();
        out.push_str(&format!(
            "{}\n",
            Style::new().bold().yellow().apply_to(&book.title)
        ));
        out.push_str(&format!(
            "{} {}\n",
            Style::new().bold().apply_to("ISBN:"),
            book.isbn
        ));
        if !book.authors.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                Style::new().bold().apply_to("Authors:"),
                book.authors.join(", ")
            ));
        }
        push_opt_field!(out, "Publisher:", book.publisher);
        push_opt_field!(out, "Year:", book.year);
        out.push_str(&format!(
            "{} {}\n",
            Style::new().bold().apply_to("Price:"),
            format_money(book.price)
        ));
        out.push_str(&format!(
            "{} {}\n",
            Style::new().bold().apply_to("In stock:"),
            book.quantity
        ));
        push_opt_field!(out, "Requested:", requested);
        Ok(out)
    }

    fn ledger(&self, ledger: &BundleLedger) -> Result<String> {
        let mut out = String::new();
        if ledger.is_empty() {
            out.push_str(&format!(
                "{}\n",
                Style::new().dim().apply_to("Bundle is empty")
            ));
        } else {
            out.push_str(&header(&format!(
                "{:>3}  {:<20} {:>10} {:>9} {:>10}",
                "#", "ISBN", "List", "Discount", "Price"
            )));
            for (i, item) in ledger.items().iter().enumerate() {
                out.push_str(&format!(
                    "{:>3}  {:<20} {:>10} {:>9} {:>10}\n",
                    i,
                    item.isbn(),
                    format_money(item.list_price()),
                    format_discount(item.discount()),
                    format_money(item.discounted_price()),
                ));
            }
        }
        out.push_str(&format!(
            "{} {}  {} {}\n",
            Style::new().bold().apply_to("Total:"),
            Style::new().green().apply_to(format_money(ledger.total_after_discount())),
            Style::new().bold().apply_to("Savings:"),
            format_money(ledger.total_savings()),
        ));
        Ok(out)
    }

    fn requests(&self, requests: &[RestockRequest]) -> Result<String> {
        if requests.is_empty() {
            return Ok("No pending requests.\n".to_string());
        }
        let mut out = header(&format!("{:<20} {:>8}  {}", "ISBN", "Copies", "Title"));
        for request in requests {
            out.push_str(&format!(
                "{:<20} {:>8}  {}\n",
                request.isbn, request.quantity, request.title
            ));
        }
        Ok(out)
    }

    fn bundles(&self, bundles: &[BundleSummary]) -> Result<String> {
        if bundles.is_empty() {
            return Ok("No bundles saved.\n".to_string());
        }
        let mut out = String::new();
        for bundle in bundles {
            out.push_str(&format!(
                "{} {} ({} books, clerk {})\n",
                Style::new().dim().apply_to(format!("#{}", bundle.id)),
                Style::new().bold().yellow().apply_to(&bundle.name),
                bundle.item_count,
                bundle.clerk,
            ));
            if !bundle.comment.is_empty() {
                out.push_str(&format!("    {}\n", bundle.comment));
            }
        }
        Ok(out)
    }
}

/// Pretty printed JSON documents
pub struct JsonFormatter;

#[derive(Serialize)]
struct DetailsView<'a> {
    #[serde(flatten)]
    book: &'a BookDetails,
    requested: Option<u32>,
}

#[derive(Serialize)]
struct LedgerItemView<'a> {
    isbn: &'a str,
    list_price: String,
    discount: String,
    price: String,
}

#[derive(Serialize)]
struct LedgerView<'a> {
    items: Vec<LedgerItemView<'a>>,
    list_total: String,
    total: String,
    savings: String,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

impl DisplayFormatter for JsonFormatter {
    fn rows(&self, rows: &[BookRow]) -> Result<String> {
        to_json(rows)
    }

    fn details(&self, book: &BookDetails, requested: Option<u32>) -> Result<String> {
        to_json(&DetailsView { book, requested })
    }

    fn ledger(&self, ledger: &BundleLedger) -> Result<String> {
        let items = ledger
            .items()
            .iter()
            .map(|item| LedgerItemView {
                isbn: item.isbn(),
                list_price: format_money(item.list_price()),
                discount: item.discount().normalize().to_string(),
                price: format_money(item.discounted_price()),
            })
            .collect();
        to_json(&LedgerView {
            items,
            list_total: format_money(ledger.total_list_price()),
            total: format_money(ledger.total_after_discount()),
            savings: format_money(ledger.total_savings()),
        })
    }

    fn requests(&self, requests: &[RestockRequest]) -> Result<String> {
        to_json(requests)
    }

    fn bundles(&self, bundles: &[BundleSummary]) -> Result<String> {
        to_json(bundles)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal::Decimal;

    fn plain() -> TextFormatter {
        console::set_colors_enabled(false);
        TextFormatter
    }

    fn sample_rows() -> Vec<BookRow> {
        vec![
            BookRow {
                isbn: "978-0-13-110362-7".to_string(),
                sold_count: 22,
                quantity: 4,
            },
            BookRow {
                isbn: "978-1-59327-828-1".to_string(),
                sold_count: 17,
                quantity: 8,
            },
        ]
    }

    fn sample_book() -> BookDetails {
        BookDetails {
            isbn: "978-0-13-110362-7".to_string(),
            title: "The C Programming Language".to_string(),
            price: Decimal::new(5499, 2),
            quantity: 4,
            year: Some(1988),
            publisher: Some("Prentice Hall".to_string()),
            authors: vec!["Brian Kernighan".to_string(), "Dennis Ritchie".to_string()],
        }
    }

    #[test]
    fn test_rows_text_ends_with_count() {
        let text = plain().rows(&sample_rows()).unwrap();
        assert!(text.contains("978-1-59327-828-1"));
        assert!(text.trim_end().ends_with("2 rows were found."));
    }

    #[test]
    fn test_rows_text_singular_and_empty() {
        let rows = sample_rows();
        assert!(plain().rows(&rows[..1]).unwrap().contains("1 row was found."));
        assert_eq!(plain().rows(&[]).unwrap(), "0 rows were found.\n");
    }

    #[test]
    fn test_details_text() {
        let text = plain().details(&sample_book(), Some(12)).unwrap();
        assert!(text.starts_with("The C Programming Language"));
        assert!(text.contains("Authors: Brian Kernighan, Dennis Ritchie"));
        assert!(text.contains("Price: 54.99"));
        assert!(text.contains("Requested: 12"));
    }

    #[test]
    fn test_details_text_without_optional_fields() {
        let mut book = sample_book();
        book.publisher = None;
        book.year = None;
        let text = plain().details(&book, None).unwrap();
        assert!(!text.contains("Publisher:"));
        assert!(!text.contains("Year:"));
        assert!(!text.contains("Requested:"));
    }

    #[test]
    fn test_ledger_text_totals() {
        let mut ledger = BundleLedger::new();
        ledger.add_item("A", Decimal::new(30, 0)).unwrap();
        ledger.set_discount(0, Decimal::new(1, 1)).unwrap();

        let text = plain().ledger(&ledger).unwrap();
        assert!(text.contains("10%"));
        assert!(text.contains("Total: 27.00  Savings: 3.00"));
    }

    #[test]
    fn test_ledger_text_empty() {
        let text = plain().ledger(&BundleLedger::new()).unwrap();
        assert!(text.contains("Bundle is empty"));
        assert!(text.contains("Total: 0.00"));
    }

    #[test]
    fn test_rows_json() {
        let json = JsonFormatter.rows(&sample_rows()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["isbn"], "978-0-13-110362-7");
        assert_eq!(value[1]["sold_count"], 17);
    }

    #[test]
    fn test_details_json_flattens_book() {
        let json = JsonFormatter.details(&sample_book(), None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "The C Programming Language");
        assert!(value["requested"].is_null());
    }

    #[test]
    fn test_ledger_json() {
        let mut ledger = BundleLedger::new();
        ledger.add_item("A", Decimal::new(20, 0)).unwrap();
        ledger.set_discount(0, Decimal::new(25, 2)).unwrap();

        let json = JsonFormatter.ledger(&ledger).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["items"][0]["discount"], "0.25");
        assert_eq!(value["items"][0]["price"], "15.00");
        assert_eq!(value["savings"], "5.00");
        assert_eq!(value["list_total"], "20.00");
    }

    #[test]
    fn test_formatter_for_flag() {
        let rows = sample_rows();
        assert!(formatter_for(true).rows(&rows).unwrap().starts_with('['));
        assert!(formatter_for(false).rows(&rows).unwrap().contains("rows were found"));
    }
}
