//! Search filter state
//!
//! Two linked ranges narrow the stock search: how many copies of a book were
//! bought, and how many are in stock. Each range has a "more than" (lower)
//! and a "less than" (upper) bound that can be switched on and off
//! independently. The reconciler keeps `lower <= upper` after every change
//! and projects the ranges onto the four query parameters of a search.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, invalid_date};

/// Query value used for a lower bound whose toggle is off
pub const OPEN_LOWER: u32 = 0;

/// Query value used for an upper bound whose toggle is off
pub const OPEN_UPPER: u32 = 9000;

/// Format of purchase dates in the history table
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A filtered metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Number of recorded purchases of a book
    Bought,
    /// Copies currently in stock
    Stock,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Bought => write!(f, "bought"),
            Metric::Stock => write!(f, "in stock"),
        }
    }
}

/// Lower and upper bound for one metric, each with an on/off toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangePair {
    lower: u32,
    upper: u32,
    lower_active: bool,
    upper_active: bool,
}

impl Default for RangePair {
    fn default() -> Self {
        Self {
            lower: OPEN_LOWER,
            upper: OPEN_UPPER,
            lower_active: false,
            upper_active: false,
        }
    }
}

impl RangePair {
    pub fn lower(&self) -> u32 {
        self.lower
    }

    pub fn upper(&self) -> u32 {
        self.upper
    }

    pub fn lower_active(&self) -> bool {
        self.lower_active
    }

    pub fn upper_active(&self) -> bool {
        self.upper_active
    }

    /// Set the "more than" bound, pushing the upper bound up if needed
    pub fn set_lower(&mut self, value: u32) {
        self.lower = value;
        if self.lower > self.upper {
            self.upper = value;
        }
    }

    /// Set the "less than" bound, pulling the lower bound down if needed
    pub fn set_upper(&mut self, value: u32) {
        self.upper = value;
        if self.upper < self.lower {
            self.lower = value;
        }
    }

    /// Toggle the "more than" bound
    ///
    /// Activating it keeps the "less than" bound at or above it.
    pub fn set_lower_active(&mut self, active: bool) {
        if active {
            self.upper = self.upper.max(self.lower);
        }
        self.lower_active = active;
    }

    /// Toggle the "less than" bound
    ///
    /// Activating it keeps the "more than" bound at or below it.
    pub fn set_upper_active(&mut self, active: bool) {
        if active {
            self.lower = self.lower.min(self.upper);
        }
        self.upper_active = active;
    }

    /// Bounds passed to a query, with open sentinels for inactive toggles
    pub fn effective(&self) -> (u32, u32) {
        let from = if self.lower_active {
            self.lower
        } else {
            OPEN_LOWER
        };
        let to = if self.upper_active {
            self.upper
        } else {
            OPEN_UPPER
        };
        (from, to)
    }

    /// Overwrite every field at once without intermediate clamping
    ///
    /// `Some(v)` activates a bound at `v`; `None` deactivates it and resets it
    /// to the open sentinel. Ordering is restored afterwards, moving only an
    /// inactive bound when exactly one side is active.
    fn overwrite(&mut self, lower: Option<u32>, upper: Option<u32>) {
        self.lower = lower.unwrap_or(OPEN_LOWER);
        self.lower_active = lower.is_some();
        self.upper = upper.unwrap_or(OPEN_UPPER);
        self.upper_active = upper.is_some();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        if self.lower <= self.upper {
            return;
        }
        if self.upper_active && !self.lower_active {
            self.lower = self.upper;
        } else {
            self.upper = self.lower;
        }
    }
}

/// Named filter presets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Selling well and running low: bought at least 15 times, at most 10 in stock
    Trending,
    /// Piling up: bought at most 5 times, at least 10 in stock
    Overstocked,
    /// Bounds edited by hand
    #[default]
    Custom,
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Trending => write!(f, "trending"),
            Preset::Overstocked => write!(f, "overstocked"),
            Preset::Custom => write!(f, "custom"),
        }
    }
}

/// A single user edit of the filter controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    SetLower(Metric, u32),
    SetUpper(Metric, u32),
    SetLowerActive(Metric, bool),
    SetUpperActive(Metric, bool),
    ApplyPreset(Preset),
}

/// Query parameters derived from the filter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectiveQueryBounds {
    pub from_bought: u32,
    pub to_bought: u32,
    pub from_stock: u32,
    pub to_stock: u32,
}

impl Default for EffectiveQueryBounds {
    fn default() -> Self {
        Self {
            from_bought: OPEN_LOWER,
            to_bought: OPEN_UPPER,
            from_stock: OPEN_LOWER,
            to_stock: OPEN_UPPER,
        }
    }
}

/// Keeps the bought and stock ranges consistent
#[derive(Debug, Clone, Default)]
pub struct FilterRangeReconciler {
    bought: RangePair,
    stock: RangePair,
    preset: Preset,
}

impl FilterRangeReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a preset instead of the open ranges
    pub fn with_preset(preset: Preset) -> Self {
        let mut reconciler = Self::default();
        reconciler.apply_preset(preset);
        reconciler
    }

    pub fn pair(&self, metric: Metric) -> &RangePair {
        match metric {
            Metric::Bought => &self.bought,
            Metric::Stock => &self.stock,
        }
    }

    /// Preset currently in effect; `Custom` once any bound was edited by hand
    pub fn preset(&self) -> Preset {
        self.preset
    }

    fn edit(&mut self, metric: Metric) -> &mut RangePair {
        self.preset = Preset::Custom;
        match metric {
            Metric::Bought => &mut self.bought,
            Metric::Stock => &mut self.stock,
        }
    }

    pub fn set_lower(&mut self, metric: Metric, value: u32) {
        self.edit(metric).set_lower(value);
    }

    pub fn set_upper(&mut self, metric: Metric, value: u32) {
        self.edit(metric).set_upper(value);
    }

    pub fn set_lower_active(&mut self, metric: Metric, active: bool) {
        self.edit(metric).set_lower_active(active);
    }

    pub fn set_upper_active(&mut self, metric: Metric, active: bool) {
        self.edit(metric).set_upper_active(active);
    }

    /// Overwrite both ranges with a preset's values
    ///
    /// `Custom` leaves the current values untouched.
    pub fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Trending => {
                self.stock.overwrite(None, Some(10));
                self.bought.overwrite(Some(15), None);
            }
            Preset::Overstocked => {
                self.stock.overwrite(Some(10), None);
                self.bought.overwrite(None, Some(5));
            }
            Preset::Custom => {}
        }
        self.preset = preset;
    }

    /// Dispatch a control edit to the matching operation
    pub fn apply(&mut self, action: FilterAction) {
        match action {
            FilterAction::SetLower(metric, value) => self.set_lower(metric, value),
            FilterAction::SetUpper(metric, value) => self.set_upper(metric, value),
            FilterAction::SetLowerActive(metric, active) => self.set_lower_active(metric, active),
            FilterAction::SetUpperActive(metric, active) => self.set_upper_active(metric, active),
            FilterAction::ApplyPreset(preset) => self.apply_preset(preset),
        }
    }

    pub fn effective_bounds(&self) -> EffectiveQueryBounds {
        let (from_bought, to_bought) = self.bought.effective();
        let (from_stock, to_stock) = self.stock.effective();
        EffectiveQueryBounds {
            from_bought,
            to_bought,
            from_stock,
            to_stock,
        }
    }
}

/// Purchase date window for a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            from: NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN),
            to: NaiveDate::from_ymd_opt(3000, 12, 12).unwrap_or(NaiveDate::MAX),
        }
    }
}

impl DateRange {
    /// Build a window, defaulting missing ends to the open range
    pub fn new(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let open = Self::default();
        let from = from.map(parse_date).transpose()?.unwrap_or(open.from);
        let to = to.map(parse_date).transpose()?.unwrap_or(open.to);
        if from > to {
            return Err(invalid_date(format!("{from} is after {to}")));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }
}

/// Parse a calendar date written as `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    // chrono accepts unpadded fields, the stored history does not use them
    if value.len() != 10 {
        return Err(invalid_date(value));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid_date(value))
}
