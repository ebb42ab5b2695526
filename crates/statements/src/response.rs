//! Income statement response model.

use serde::{Deserialize, Serialize};

use statements_engine::IncomeStatement;

/// Message attached to every successful response.
pub const SUCCESS_MESSAGE: &str = "Success";

/// A successful income statement response.
///
/// Serializes as `{cik, company_name, output_type, periods, data, message}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementResponse {
    /// The CIK as the caller sent it.
    pub cik: String,
    /// The statement.
    #[serde(flatten)]
    pub statement: IncomeStatement,
    /// Always [`SUCCESS_MESSAGE`].
    pub message: String,
}

impl IncomeStatementResponse {
    /// Wraps a statement in a successful response.
    pub fn success(cik: impl Into<String>, statement: IncomeStatement) -> Self {
        Self {
            cik: cik.into(),
            statement,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statements_core::{LineItem, OutputType, PeriodKey};
    use statements_engine::Projection;

    fn response() -> IncomeStatementResponse {
        let projection = Projection {
            periods: vec![PeriodKey::annual(2022), PeriodKey::annual(2023)],
            series: vec![(LineItem::TotalRevenues, vec![Some(394_328_000_000.0), None])],
        };
        let statement =
            IncomeStatement::from_projection("Apple Inc.", OutputType::Annual, projection);
        IncomeStatementResponse::success("320193", statement)
    }

    #[test]
    fn test_response_shape() {
        let value = serde_json::to_value(response()).unwrap();
        assert_eq!(value["cik"], "320193");
        assert_eq!(value["company_name"], "Apple Inc.");
        assert_eq!(value["output_type"], "annual");
        assert_eq!(value["periods"], serde_json::json!(["2022", "2023"]));
        assert_eq!(value["message"], "Success");

        let revenue = &value["data"]["Total Revenues"];
        assert_eq!(revenue[0]["formatted"], "$394.33B");
        assert!(revenue[1]["raw"].is_null());
    }

    #[test]
    fn test_response_round_trip() {
        let original = response();
        let json = serde_json::to_string(&original).unwrap();
        let parsed: IncomeStatementResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
