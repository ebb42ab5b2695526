//! Company facts document parsing.

use chrono::NaiveDate;
use serde::Deserialize;
use statements_core::{CompanyFacts, FiscalPeriod, FormType, RawFact, Result, StatementError};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Response from the SEC EDGAR Company Facts API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyFactsResponse {
    /// CIK number
    #[serde(default)]
    cik: Option<u64>,
    /// Entity name
    #[serde(default)]
    entity_name: Option<String>,
    /// Facts organized by taxonomy and tag
    #[serde(default)]
    facts: BTreeMap<String, BTreeMap<String, TagFacts>>,
}

/// Facts for a specific XBRL tag.
#[derive(Debug, Deserialize)]
struct TagFacts {
    /// Units (USD, shares, etc.) containing the actual fact values
    #[serde(default)]
    units: BTreeMap<String, Vec<FactValue>>,
}

/// A single fact value with metadata.
#[derive(Debug, Clone, Deserialize)]
struct FactValue {
    /// Start date of the period, absent for instants
    #[serde(default)]
    start: Option<String>,
    /// End date of the period
    end: String,
    /// Value
    val: f64,
    /// Accession number
    #[serde(default)]
    accn: Option<String>,
    /// Fiscal year
    #[serde(default)]
    fy: Option<i32>,
    /// Fiscal period
    #[serde(default)]
    fp: Option<String>,
    /// Form type
    #[serde(default)]
    form: Option<String>,
    /// Filed date
    #[serde(default)]
    filed: Option<String>,
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parses a company facts document into raw facts.
///
/// Concept tags are namespaced with their taxonomy (`us-gaap:Revenues`).
/// Values with an unreadable end date are skipped.
pub fn parse_company_facts(json: &str) -> Result<CompanyFacts> {
    let response: CompanyFactsResponse = serde_json::from_str(json)
        .map_err(|e| StatementError::Parse(format!("Failed to parse company facts: {e}")))?;

    let cik = response
        .cik
        .map(|cik| format!("{cik:0>10}"))
        .unwrap_or_default();

    let mut facts = Vec::new();
    let mut skipped = 0usize;
    for (taxonomy, tags) in &response.facts {
        for (tag, tag_facts) in tags {
            let concept_tag = format!("{taxonomy}:{tag}");
            for (unit, values) in &tag_facts.units {
                for value in values {
                    match to_raw_fact(&concept_tag, unit, value) {
                        Some(fact) => facts.push(fact),
                        None => skipped += 1,
                    }
                }
            }
        }
    }

    debug!(
        cik = %cik,
        facts = facts.len(),
        skipped,
        "Parsed company facts"
    );
    Ok(CompanyFacts::new(cik, response.entity_name, facts))
}

fn to_raw_fact(concept_tag: &str, unit: &str, value: &FactValue) -> Option<RawFact> {
    let Some(period_end) = parse_date(&value.end) else {
        trace!(tag = concept_tag, end = %value.end, "Skipping fact with unreadable end date");
        return None;
    };
    Some(RawFact {
        concept_tag: concept_tag.to_string(),
        value: value.val,
        unit: unit.to_string(),
        period_start: value.start.as_deref().and_then(parse_date),
        period_end,
        form_type: FormType::from_form(value.form.as_deref().unwrap_or_default()),
        filed_date: value.filed.as_deref().and_then(parse_date),
        fiscal_year: value.fy,
        fiscal_period: value.fp.as_deref().and_then(|fp| fp.parse::<FiscalPeriod>().ok()),
        accession: value.accn.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let json = r#"{
            "cik": 320193,
            "entityName": "Apple Inc.",
            "facts": {
                "us-gaap": {
                    "Revenues": {
                        "label": "Revenues",
                        "description": "Amount of revenue recognized.",
                        "units": {
                            "USD": [
                                {"start": "2023-01-01", "end": "2023-03-31", "val": 1000,
                                 "accn": "0000320193-23-000064", "fy": 2023, "fp": "Q1",
                                 "form": "10-Q", "filed": "2023-05-05", "frame": "CY2023Q1"},
                                {"start": "2023-01-01", "end": "not a date", "val": 5}
                            ]
                        }
                    }
                },
                "dei": {
                    "EntityCommonStockSharesOutstanding": {
                        "label": "Shares",
                        "units": {
                            "shares": [
                                {"end": "2023-04-21", "val": 15728702000, "fy": 2023, "fp": "Q2", "form": "10-Q", "filed": "2023-05-05"}
                            ]
                        }
                    }
                }
            }
        }"#;

        let facts = parse_company_facts(json).unwrap();
        assert_eq!(facts.cik, "0000320193");
        assert_eq!(facts.display_name(), "Apple Inc.");
        assert_eq!(facts.facts.len(), 2);

        let shares = &facts.facts[0];
        assert_eq!(shares.concept_tag, "dei:EntityCommonStockSharesOutstanding");
        assert_eq!(shares.period_start, None);

        let revenue = &facts.facts[1];
        assert_eq!(revenue.concept_tag, "us-gaap:Revenues");
        assert_eq!(revenue.value, 1000.0);
        assert_eq!(revenue.unit, "USD");
        assert_eq!(revenue.form_type, FormType::QuarterlyReport);
        assert_eq!(revenue.fiscal_year, Some(2023));
        assert_eq!(revenue.fiscal_period, Some(FiscalPeriod::Q1));
        assert_eq!(revenue.filed_date, NaiveDate::from_ymd_opt(2023, 5, 5));
        assert_eq!(revenue.accession.as_deref(), Some("0000320193-23-000064"));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_company_facts("{not json").unwrap_err();
        assert!(matches!(err, StatementError::Parse(_)));
    }

    #[test]
    fn test_parse_tolerates_missing_sections() {
        let facts = parse_company_facts(r#"{"cik": 1}"#).unwrap();
        assert_eq!(facts.cik, "0000000001");
        assert!(facts.entity_name.is_none());
        assert!(facts.facts.is_empty());
    }
}
