use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::ledger::parse_discount;

/// Arguments for the bundle command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Bundle two books, the second at 25% off:\n    clerk bundle create --name \"C classics\" \\\n      --item 978-0-13-110362-7 --item 978-0-321-12742-6=25%\n\n\
                  Discounts may also be fractions:\n    clerk bundle create --name Clearance --item 978-0-262-03384-8=0.5\n\n\
                  List saved bundles:\n    clerk bundle list")]
pub struct BundleArgs {
    #[command(subcommand)]
    pub command: BundleSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BundleSubcommand {
    /// Build and save a bundle in one go
    Create {
        /// Bundle name
        #[arg(long)]
        name: String,

        /// Free text shown with the bundle
        #[arg(long, default_value = "")]
        comment: String,

        /// Book to include, optionally with a discount (ISBN or ISBN=DISCOUNT)
        #[arg(long = "item", value_name = "ISBN[=DISCOUNT]", value_parser = parse_item, required = true)]
        items: Vec<ItemSpec>,

        /// Print the saved ledger as JSON
        #[arg(long)]
        json: bool,
    },

    /// List saved bundles
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// One `--item` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub isbn: String,
    pub discount: Decimal,
}

fn parse_item(value: &str) -> Result<ItemSpec, String> {
    let (isbn, discount) = match value.split_once('=') {
        Some((isbn, discount)) => (isbn, parse_discount(discount).map_err(|e| e.to_string())?),
        None => (value, Decimal::ZERO),
    };
    let isbn = isbn.trim();
    if isbn.is_empty() {
        return Err("ISBN must not be empty".to_string());
    }
    Ok(ItemSpec {
        isbn: isbn.to_string(),
        discount,
    })
}
