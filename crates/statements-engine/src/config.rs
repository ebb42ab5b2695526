//! Statement configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use statements_core::{LineItem, OutputType};

/// What to build: which line items, at which granularity, over which dates.
///
/// Inputs are assumed validated. Date bounds are inclusive and either may be
/// open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementConfig {
    /// Keep periods ending on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Keep periods starting on or before this date.
    pub end_date: Option<NaiveDate>,
    /// Requested line items, in output order.
    pub required_fields: Vec<LineItem>,
    /// Output granularity.
    pub output_type: OutputType,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            required_fields: LineItem::ALL.to_vec(),
            output_type: OutputType::default(),
        }
    }
}

impl StatementConfig {
    /// Creates a configuration covering every line item, quarterly, unbounded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive lower date bound.
    #[must_use]
    pub const fn with_start_date(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Sets the inclusive upper date bound.
    #[must_use]
    pub const fn with_end_date(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Sets the requested line items.
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<LineItem>) -> Self {
        self.required_fields = fields;
        self
    }

    /// Sets the output granularity.
    #[must_use]
    pub const fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    /// Returns true if a period with the given dates overlaps the window.
    /// Unknown period dates never exclude.
    #[must_use]
    pub fn contains(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        let ends_in_time = match (self.start_date, end) {
            (Some(bound), Some(end)) => end >= bound,
            _ => true,
        };
        let starts_in_time = match (self.end_date, start) {
            (Some(bound), Some(start)) => start <= bound,
            _ => true,
        };
        ends_in_time && starts_in_time
    }
}
