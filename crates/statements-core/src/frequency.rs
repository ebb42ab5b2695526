//! Output granularity and fact duration definitions.
//!
//! This module defines [`OutputType`] for the granularity of a produced
//! statement and [`DurationClass`] for the span a single reported fact covers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StatementError;

/// Granularity of the produced time series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// One entry per fiscal quarter.
    #[default]
    Quarterly,
    /// One entry per fiscal year.
    Annual,
    /// Trailing twelve months, one entry per ending fiscal quarter.
    Ttm,
}

impl OutputType {
    /// Returns the wire name (`quarterly`, `annual`, `ttm`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
            Self::Ttm => "ttm",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputType {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quarterly" => Ok(Self::Quarterly),
            "annual" => Ok(Self::Annual),
            "ttm" => Ok(Self::Ttm),
            _ => Err(StatementError::InvalidOutputType(s.to_string())),
        }
    }
}

/// The span covered by a reported fact.
///
/// Classified from the number of days between `period_start` and `period_end`.
/// Filers report 52/53-week years and 13/14-week quarters, so the bands are
/// deliberately wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DurationClass {
    /// Point in time (no start date, or start equals end).
    Instant,
    /// A standalone quarter (about three months).
    Quarter,
    /// Year-to-date through the second quarter (about six months).
    HalfYear,
    /// Year-to-date through the third quarter (about nine months).
    NineMonths,
    /// A full fiscal year (about twelve months).
    Annual,
}

impl DurationClass {
    /// Classifies a duration given in days. Returns `None` for spans that
    /// match no reporting period (e.g. a two-month stub period).
    #[must_use]
    pub const fn from_days(days: i64) -> Option<Self> {
        match days {
            0 => Some(Self::Instant),
            75..=105 => Some(Self::Quarter),
            165..=200 => Some(Self::HalfYear),
            255..=290 => Some(Self::NineMonths),
            340..=380 => Some(Self::Annual),
            _ => None,
        }
    }

    /// Classifies a fact from its period dates.
    #[must_use]
    pub fn classify(start: Option<NaiveDate>, end: NaiveDate) -> Option<Self> {
        match start {
            None => Some(Self::Instant),
            Some(start) => Self::from_days(end.signed_duration_since(start).num_days()),
        }
    }
}
