//! The aligned statement handed to presentation.

use serde::{Deserialize, Serialize};

use statements_core::{LineItem, OutputType};

use crate::aggregate::Projection;
use crate::format::format_value;

/// One value of a series: the raw number and its display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Raw value, `None` when unknown.
    pub raw: Option<f64>,
    /// Short display string, `None` when unknown.
    pub formatted: Option<String>,
}

impl Cell {
    /// Builds a cell for a line item value.
    #[must_use]
    pub fn new(item: LineItem, raw: Option<f64>) -> Self {
        Self {
            raw,
            formatted: format_value(item, raw),
        }
    }
}

/// The values of one line item, aligned with the statement's periods.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    /// Line item.
    pub item: LineItem,
    /// One cell per period.
    pub cells: Vec<Cell>,
}

/// An income statement for one company.
///
/// Serializes with `data` as a JSON object keyed by line-item display name,
/// in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Entity display name.
    pub company_name: String,
    /// Granularity of the periods.
    pub output_type: OutputType,
    /// Period labels, chronological.
    pub periods: Vec<String>,
    /// Requested line items, each aligned with `periods`.
    #[serde(rename = "data", with = "series_map")]
    pub series: Vec<LineSeries>,
}

impl IncomeStatement {
    /// Formats a projection into a statement.
    #[must_use]
    pub fn from_projection(
        company_name: impl Into<String>,
        output_type: OutputType,
        projection: Projection,
    ) -> Self {
        let periods = projection.periods.iter().map(|key| key.label()).collect();
        let series = projection
            .series
            .into_iter()
            .map(|(item, values)| LineSeries {
                item,
                cells: values.into_iter().map(|raw| Cell::new(item, raw)).collect(),
            })
            .collect();
        Self {
            company_name: company_name.into(),
            output_type,
            periods,
            series,
        }
    }

    /// Returns the series of a line item, if it was requested.
    #[must_use]
    pub fn series(&self, item: LineItem) -> Option<&LineSeries> {
        self.series.iter().find(|s| s.item == item)
    }

    /// Returns the raw values of a line item, if it was requested.
    #[must_use]
    pub fn values(&self, item: LineItem) -> Option<Vec<Option<f64>>> {
        self.series(item)
            .map(|s| s.cells.iter().map(|cell| cell.raw).collect())
    }

    /// Returns true if no period survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

mod series_map {
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    use super::{Cell, LineSeries};
    use statements_core::LineItem;

    pub(super) fn serialize<S: Serializer>(
        series: &[LineSeries],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(series.iter().map(|s| (s.item, &s.cells)))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<LineSeries>, D::Error> {
        deserializer.deserialize_map(SeriesVisitor)
    }

    struct SeriesVisitor;

    impl<'de> Visitor<'de> for SeriesVisitor {
        type Value = Vec<LineSeries>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of line item names to cells")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut series = Vec::with_capacity(map.size_hint().unwrap_or_default());
            while let Some((item, cells)) = map.next_entry::<LineItem, Vec<Cell>>()? {
                series.push(LineSeries { item, cells });
            }
            Ok(series)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statements_core::PeriodKey;

    fn statement() -> IncomeStatement {
        let projection = Projection {
            periods: vec![PeriodKey::quarter(2024, 1), PeriodKey::quarter(2024, 2)],
            series: vec![
                (LineItem::TotalRevenues, vec![Some(2_500_000.0), None]),
                (LineItem::NetIncome, vec![Some(-1_500.0), Some(12.0)]),
            ],
        };
        IncomeStatement::from_projection("Acme Corp", OutputType::Quarterly, projection)
    }

    #[test]
    fn test_from_projection() {
        let statement = statement();
        assert_eq!(statement.periods, vec!["2024Q1", "2024Q2"]);
        let revenue = statement.series(LineItem::TotalRevenues).unwrap();
        assert_eq!(revenue.cells[0].formatted.as_deref(), Some("$2.50M"));
        assert_eq!(revenue.cells[1], Cell { raw: None, formatted: None });
        assert_eq!(
            statement.values(LineItem::NetIncome),
            Some(vec![Some(-1_500.0), Some(12.0)])
        );
        assert!(statement.series(LineItem::Ebit).is_none());
    }

    #[test]
    fn test_serializes_data_in_request_order() {
        let json = serde_json::to_string(&statement()).unwrap();
        let revenue = json.find("\"Total Revenues\"").unwrap();
        let net_income = json.find("\"Net Income\"").unwrap();
        assert!(revenue < net_income);
        assert!(json.contains("\"output_type\":\"quarterly\""));
        assert!(json.contains("{\"raw\":null,\"formatted\":null}"));
        assert!(json.contains("\"formatted\":\"-$1.50K\""));
    }

    #[test]
    fn test_deserialize_round_trip() {
        let original = statement();
        let json = serde_json::to_string(&original).unwrap();
        let parsed: IncomeStatement = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
