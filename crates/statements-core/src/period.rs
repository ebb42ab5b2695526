//! Fiscal period keys and the per-period value table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::line_item::LineItem;

/// Identifies a resolved fiscal period: a fiscal quarter or a full fiscal year.
///
/// Keys order chronologically. The quarters of a fiscal year sort before the
/// annual key of the same year, so `2023Q1 < 2023Q4 < 2023 < 2024Q1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Fiscal year as asserted by the filer.
    pub fiscal_year: i32,
    /// Fiscal quarter (1-4), or `None` for the full year.
    pub fiscal_quarter: Option<u8>,
}

impl PeriodKey {
    /// Key of a fiscal quarter.
    #[must_use]
    pub const fn quarter(fiscal_year: i32, quarter: u8) -> Self {
        Self {
            fiscal_year,
            fiscal_quarter: Some(quarter),
        }
    }

    /// Key of a full fiscal year.
    #[must_use]
    pub const fn annual(fiscal_year: i32) -> Self {
        Self {
            fiscal_year,
            fiscal_quarter: None,
        }
    }

    /// Returns true for a full-year key.
    #[must_use]
    pub const fn is_annual(&self) -> bool {
        self.fiscal_quarter.is_none()
    }

    /// The fiscal quarter immediately before this one, crossing year ends.
    #[must_use]
    pub const fn previous_quarter(&self) -> Option<Self> {
        match self.fiscal_quarter {
            Some(1) => Some(Self::quarter(self.fiscal_year - 1, 4)),
            Some(q) => Some(Self::quarter(self.fiscal_year, q - 1)),
            None => None,
        }
    }

    /// Output label: `2024Q1` for quarters, `2024` for years.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }

    const fn sort_quarter(&self) -> u8 {
        match self.fiscal_quarter {
            Some(q) => q,
            None => u8::MAX,
        }
    }
}

impl Ord for PeriodKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fiscal_year
            .cmp(&other.fiscal_year)
            .then_with(|| self.sort_quarter().cmp(&other.sort_quarter()))
    }
}

impl PartialOrd for PeriodKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fiscal_quarter {
            Some(q) => write!(f, "{}Q{}", self.fiscal_year, q),
            None => write!(f, "{}", self.fiscal_year),
        }
    }
}

/// Line-item values resolved for one [`PeriodKey`].
///
/// A line item absent from the table is unknown; it is never read as zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// First day of the period, when known.
    pub start: Option<NaiveDate>,
    /// Last day of the period, when known.
    pub end: Option<NaiveDate>,
    values: BTreeMap<LineItem, f64>,
}

impl PeriodRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a line item, or `None` if unknown.
    #[must_use]
    pub fn get(&self, item: LineItem) -> Option<f64> {
        self.values.get(&item).copied()
    }

    /// Returns true if the line item has a value.
    #[must_use]
    pub fn contains(&self, item: LineItem) -> bool {
        self.values.contains_key(&item)
    }

    /// Records a value.
    pub fn set(&mut self, item: LineItem, value: f64) {
        self.values.insert(item, value);
    }

    /// Sets the period dates if not already known.
    pub fn set_dates(&mut self, start: Option<NaiveDate>, end: NaiveDate) {
        if self.end.is_none() {
            self.start = start;
            self.end = Some(end);
        }
    }
}
