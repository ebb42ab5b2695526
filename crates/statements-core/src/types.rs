//! Raw fact types as delivered by a fact source.
//!
//! - [`RawFact`] - One reported number from a filing
//! - [`FormType`] - Kind of filing a fact came from
//! - [`FiscalPeriod`] - Fiscal period asserted by the filer
//! - [`CompanyFacts`] - All facts for one entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StatementError;
use crate::frequency::DurationClass;

/// Kind of filing a fact was reported in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    /// Quarterly report (10-Q and amendments).
    QuarterlyReport,
    /// Annual report (10-K, 20-F, 40-F and amendments).
    AnnualReport,
    /// Any other form (8-K, S-1, ...).
    Other(String),
}

impl FormType {
    /// Classifies an SEC form name.
    #[must_use]
    pub fn from_form(form: &str) -> Self {
        let base = form.trim().trim_end_matches("/A").to_ascii_uppercase();
        match base.as_str() {
            "10-Q" | "10-QT" => Self::QuarterlyReport,
            "10-K" | "10-KT" | "20-F" | "40-F" => Self::AnnualReport,
            _ => Self::Other(form.trim().to_string()),
        }
    }

    /// Returns true if this form is the authoritative source for facts of the
    /// given duration class: quarterly reports for sub-annual spans, annual
    /// reports for full years.
    #[must_use]
    pub const fn is_authoritative_for(&self, class: DurationClass) -> bool {
        match self {
            Self::QuarterlyReport => !matches!(class, DurationClass::Annual),
            Self::AnnualReport => matches!(class, DurationClass::Annual),
            Self::Other(_) => false,
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuarterlyReport => f.write_str("10-Q"),
            Self::AnnualReport => f.write_str("10-K"),
            Self::Other(form) => f.write_str(form),
        }
    }
}

/// Fiscal period asserted by the filer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FiscalPeriod {
    /// First fiscal quarter.
    Q1,
    /// Second fiscal quarter.
    Q2,
    /// Third fiscal quarter.
    Q3,
    /// Fourth fiscal quarter.
    Q4,
    /// Full fiscal year.
    FY,
}

impl FiscalPeriod {
    /// The quarter number (1-4), or `None` for a full year.
    #[must_use]
    pub const fn quarter(&self) -> Option<u8> {
        match self {
            Self::Q1 => Some(1),
            Self::Q2 => Some(2),
            Self::Q3 => Some(3),
            Self::Q4 => Some(4),
            Self::FY => None,
        }
    }
}

impl FromStr for FiscalPeriod {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(Self::Q1),
            "Q2" => Ok(Self::Q2),
            "Q3" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            "FY" => Ok(Self::FY),
            other => Err(StatementError::Parse(format!(
                "Unknown fiscal period: {other}"
            ))),
        }
    }
}

/// One reported number from a filing.
///
/// Immutable input to the engine. `fiscal_year` and `fiscal_period` describe
/// the filing the fact appeared in, so prior-year comparatives carry the
/// later filing's year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawFact {
    /// Source taxonomy concept (e.g. `Revenues` or `us-gaap:Revenues`).
    pub concept_tag: String,
    /// Reported value.
    pub value: f64,
    /// Unit of measure (e.g. `USD`, `USD/shares`, `shares`).
    pub unit: String,
    /// Start of the reporting period; `None` for instantaneous facts.
    pub period_start: Option<NaiveDate>,
    /// End of the reporting period.
    pub period_end: NaiveDate,
    /// Filing form.
    pub form_type: FormType,
    /// Date the filing was accepted.
    pub filed_date: Option<NaiveDate>,
    /// Fiscal year of the filing.
    pub fiscal_year: Option<i32>,
    /// Fiscal period of the filing.
    pub fiscal_period: Option<FiscalPeriod>,
    /// Accession number of the filing.
    pub accession: Option<String>,
}

impl RawFact {
    /// Creates a fact with required fields; filing metadata is left empty.
    #[must_use]
    pub fn new(
        concept_tag: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        period_start: Option<NaiveDate>,
        period_end: NaiveDate,
    ) -> Self {
        Self {
            concept_tag: concept_tag.into(),
            value,
            unit: unit.into(),
            period_start,
            period_end,
            form_type: FormType::Other(String::new()),
            filed_date: None,
            fiscal_year: None,
            fiscal_period: None,
            accession: None,
        }
    }

    /// Sets the filing the fact was reported in.
    #[must_use]
    pub fn with_filing(
        mut self,
        form_type: FormType,
        fiscal_year: i32,
        fiscal_period: FiscalPeriod,
        filed_date: NaiveDate,
    ) -> Self {
        self.form_type = form_type;
        self.fiscal_year = Some(fiscal_year);
        self.fiscal_period = Some(fiscal_period);
        self.filed_date = Some(filed_date);
        self
    }

    /// Returns the duration class of this fact, if it covers a reporting period.
    #[must_use]
    pub fn duration_class(&self) -> Option<DurationClass> {
        let start = self.period_start.filter(|start| *start != self.period_end);
        DurationClass::classify(start, self.period_end)
    }

    /// Returns the duration in days if this is a duration fact.
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        self.period_start
            .map(|start| self.period_end.signed_duration_since(start).num_days())
    }
}

/// Normalizes a CIK to the 10-digit zero-padded form used by EDGAR.
///
/// Non-digit characters are ignored, so `"CIK320193"` and `"320193"` denote
/// the same company.
pub fn normalize_cik(cik: &str) -> Result<String, StatementError> {
    let digits: String = cik.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() || digits.len() > 10 {
        return Err(StatementError::InvalidParameter(format!("Invalid CIK: {cik}")));
    }
    Ok(format!("{digits:0>10}"))
}

/// All facts known for one entity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFacts {
    /// Zero-padded 10-digit CIK.
    pub cik: String,
    /// Entity display name.
    pub entity_name: Option<String>,
    /// Reported facts, unordered.
    pub facts: Vec<RawFact>,
}

impl CompanyFacts {
    /// Creates a fact collection for an entity.
    #[must_use]
    pub fn new(cik: impl Into<String>, entity_name: Option<String>, facts: Vec<RawFact>) -> Self {
        Self {
            cik: cik.into(),
            entity_name,
            facts,
        }
    }

    /// Returns the entity name, or `"Unknown"` when the source had none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.entity_name.as_deref().unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_form_type_from_form() {
        assert_eq!(FormType::from_form("10-Q"), FormType::QuarterlyReport);
        assert_eq!(FormType::from_form("10-K/A"), FormType::AnnualReport);
        assert_eq!(FormType::from_form("20-F"), FormType::AnnualReport);
        assert_eq!(
            FormType::from_form("8-K"),
            FormType::Other("8-K".to_string())
        );
    }

    #[test]
    fn test_authoritative_form() {
        assert!(FormType::QuarterlyReport.is_authoritative_for(DurationClass::Quarter));
        assert!(FormType::QuarterlyReport.is_authoritative_for(DurationClass::NineMonths));
        assert!(!FormType::QuarterlyReport.is_authoritative_for(DurationClass::Annual));
        assert!(FormType::AnnualReport.is_authoritative_for(DurationClass::Annual));
        assert!(!FormType::Other("8-K".into()).is_authoritative_for(DurationClass::Annual));
    }

    #[test]
    fn test_fiscal_period_parse() {
        assert_eq!("q3".parse::<FiscalPeriod>().unwrap(), FiscalPeriod::Q3);
        assert_eq!("FY".parse::<FiscalPeriod>().unwrap().quarter(), None);
        assert!("H1".parse::<FiscalPeriod>().is_err());
    }

    #[test]
    fn test_raw_fact_duration() {
        let fact = RawFact::new(
            "Revenues",
            100.0,
            "USD",
            Some(date(2023, 1, 1)),
            date(2023, 12, 31),
        );
        assert_eq!(fact.duration_days(), Some(364));
        assert_eq!(fact.duration_class(), Some(DurationClass::Annual));

        let instant = RawFact::new("Shares", 5.0, "shares", None, date(2023, 12, 31));
        assert_eq!(instant.duration_class(), Some(DurationClass::Instant));
        assert_eq!(instant.duration_days(), None);
    }

    #[test]
    fn test_start_equal_to_end_is_instant() {
        let fact = RawFact::new(
            "Shares",
            5.0,
            "shares",
            Some(date(2023, 12, 31)),
            date(2023, 12, 31),
        );
        assert_eq!(fact.duration_class(), Some(DurationClass::Instant));
    }

    #[rstest]
    #[case("320193", "0000320193")]
    #[case("0000320193", "0000320193")]
    #[case("CIK320193", "0000320193")]
    #[case(" 789019 ", "0000789019")]
    fn test_normalize_cik(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_cik(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("AAPL")]
    #[case("12345678901")]
    fn test_normalize_cik_rejects(#[case] input: &str) {
        assert!(matches!(
            normalize_cik(input),
            Err(StatementError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_company_display_name() {
        let facts = CompanyFacts::new("0000320193", None, Vec::new());
        assert_eq!(facts.display_name(), "Unknown");
    }
}
