use clap::Parser;

use crate::filter::{FilterAction, Metric, Preset};

/// Arguments for the search command
///
/// Giving a bound also switches it on; bounds left out stay open.
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  All books with at least one purchase:\n    clerk search\n\n\
                  Books selling well but running low:\n    clerk search --preset trending\n\n\
                  Bought 5 to 20 times during 2023:\n    clerk search --bought-min 5 --bought-max 20 --from-date 2023-01-01 --to-date 2023-12-31\n\n\
                  Start from a preset and tighten it:\n    clerk search --preset overstocked --stock-min 30")]
pub struct SearchArgs {
    /// Start from a filter preset
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Bought more than this many times
    #[arg(long, value_name = "N")]
    pub bought_min: Option<u32>,

    /// Bought less than this many times
    #[arg(long, value_name = "N")]
    pub bought_max: Option<u32>,

    /// More than this many copies in stock
    #[arg(long, value_name = "N")]
    pub stock_min: Option<u32>,

    /// Less than this many copies in stock
    #[arg(long, value_name = "N")]
    pub stock_max: Option<u32>,

    /// Count purchases from this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from_date: Option<String>,

    /// Count purchases up to this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to_date: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Filter edits in the order a clerk would make them: preset first, then bounds
    pub fn filter_actions(&self) -> Vec<FilterAction> {
        let mut actions = Vec::new();
        if let Some(preset) = self.preset {
            actions.push(FilterAction::ApplyPreset(preset));
        }
        for (metric, min, max) in [
            (Metric::Bought, self.bought_min, self.bought_max),
            (Metric::Stock, self.stock_min, self.stock_max),
        ] {
            if let Some(value) = min {
                actions.push(FilterAction::SetLower(metric, value));
                actions.push(FilterAction::SetLowerActive(metric, true));
            }
            if let Some(value) = max {
                actions.push(FilterAction::SetUpper(metric, value));
                actions.push(FilterAction::SetUpperActive(metric, true));
            }
        }
        actions
    }
}
