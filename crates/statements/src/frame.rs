//! DataFrame export.

use polars::prelude::*;

use statements_core::{Result, StatementError};
use statements_engine::IncomeStatement;

/// Name of the period label column.
pub const PERIOD_COLUMN: &str = "period";

/// Converts a statement into a wide DataFrame.
///
/// One row per period, a `period` label column, then one nullable `f64`
/// column per line item named by its display name.
pub fn to_dataframe(statement: &IncomeStatement) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(statement.series.len() + 1);
    columns.push(Column::new(PERIOD_COLUMN.into(), statement.periods.clone()));

    for series in &statement.series {
        let values: Vec<Option<f64>> = series.cells.iter().map(|cell| cell.raw).collect();
        columns.push(Column::new(series.item.name().into(), values));
    }

    DataFrame::new(columns)
        .map_err(|e| StatementError::Frame(format!("Failed to build statement frame: {e}")))
}
