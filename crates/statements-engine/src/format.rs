//! Short display strings for statement values.

use statements_core::{LineItem, ValueKind};

const SCALES: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Formats a dollar amount in short form: `$1.23B`, `-$4.50M`, `$12.00`.
#[must_use]
pub fn format_usd_short(value: f64) -> String {
    format!("{}${}", sign(value), scaled(value.abs()))
}

/// Formats a share count in short form without a currency symbol: `15.55B`.
#[must_use]
pub fn format_count_short(value: f64) -> String {
    format!("{}{}", sign(value), scaled(value.abs()))
}

/// Formats a value of the given line item. Unknown and non-finite values have
/// no display string.
#[must_use]
pub fn format_value(item: LineItem, value: Option<f64>) -> Option<String> {
    let value = value.filter(|v| v.is_finite())?;
    Some(match item.kind() {
        ValueKind::Shares => format_count_short(value),
        ValueKind::Monetary | ValueKind::PerShare => format_usd_short(value),
    })
}

fn sign(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "" }
}

fn scaled(magnitude: f64) -> String {
    SCALES
        .iter()
        .find(|(threshold, _)| magnitude >= *threshold)
        .map_or_else(
            || format!("{magnitude:.2}"),
            |(threshold, suffix)| format!("{:.2}{suffix}", magnitude / threshold),
        )
}
