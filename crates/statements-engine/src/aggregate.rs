//! Projection of resolved periods into the requested granularity.

use tracing::debug;

use statements_core::{LineItem, OutputType, PeriodKey, PeriodRecord};

use crate::config::StatementConfig;
use crate::resolver::PeriodTable;

/// Quarters in a trailing twelve-month window.
pub const TTM_WINDOW: usize = 4;

/// Period labels and index-aligned values for each requested line item.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Surviving periods, chronological.
    pub periods: Vec<PeriodKey>,
    /// One entry per requested line item, each of length `periods.len()`.
    pub series: Vec<(LineItem, Vec<Option<f64>>)>,
}

/// Trailing value at quarter `key`: the sum of it and the three fiscal
/// quarters before it.
///
/// `None` unless all four quarters are present and consecutive.
#[must_use]
pub fn trailing(table: &PeriodTable, key: PeriodKey, item: LineItem) -> Option<f64> {
    let mut current = Some(key);
    let mut sum = 0.0;
    for _ in 0..TTM_WINDOW {
        let quarter = current?;
        sum += table.get(&quarter)?.get(item)?;
        current = quarter.previous_quarter();
    }
    Some(sum)
}

/// Projects `table` into the configured granularity and date window.
///
/// A period survives when it has at least one requested value of its own and
/// overlaps the window. Missing values are kept as `None` so every series stays
/// aligned with `periods`.
#[must_use]
pub fn aggregate(table: &PeriodTable, config: &StatementConfig) -> Projection {
    let fields = &config.required_fields;
    let annual = matches!(config.output_type, OutputType::Annual);

    let periods: Vec<PeriodKey> = table
        .iter()
        .filter(|(key, _)| key.is_annual() == annual)
        .filter(|(_, record)| has_any(record, fields))
        .filter(|(_, record)| config.contains(record.start, record.end))
        .map(|(key, _)| *key)
        .collect();

    let series = fields
        .iter()
        .map(|&item| {
            let values = periods
                .iter()
                .map(|key| match config.output_type {
                    OutputType::Ttm => trailing(table, *key, item),
                    OutputType::Quarterly | OutputType::Annual => {
                        table.get(key).and_then(|record| record.get(item))
                    }
                })
                .collect();
            (item, values)
        })
        .collect();

    debug!(
        output_type = %config.output_type,
        periods = periods.len(),
        fields = fields.len(),
        "Aggregated periods"
    );
    Projection { periods, series }
}

fn has_any(record: &PeriodRecord, fields: &[LineItem]) -> bool {
    fields.iter().any(|item| record.contains(*item))
}
