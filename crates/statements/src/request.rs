//! Income statement request model and validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use statements_core::{LineItem, OutputType, Result, StatementError, normalize_cik};
use statements_engine::StatementConfig;

fn default_required_fields() -> Vec<String> {
    LineItem::ALL.iter().map(|item| item.name().to_string()).collect()
}

fn default_output_type() -> String {
    OutputType::default().as_str().to_string()
}

/// A request for one company's income statement, as received from a caller.
///
/// Fields are kept as text; [`validate`](Self::validate) turns them into a
/// [`StatementConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementRequest {
    /// Company CIK, e.g. `"320193"`.
    pub cik: String,
    /// User-Agent for SEC requests, typically a contact address.
    pub user_agent: String,
    /// Optional inclusive start date (`YYYY-MM-DD`).
    #[serde(default)]
    pub start_date: Option<String>,
    /// Optional inclusive end date (`YYYY-MM-DD`).
    #[serde(default)]
    pub end_date: Option<String>,
    /// Line items to return, by display name or alias.
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<String>,
    /// `quarterly`, `annual` or `ttm`.
    #[serde(default = "default_output_type")]
    pub output_type: String,
}

/// A request whose fields have all been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// Zero-padded 10-digit CIK.
    pub cik: String,
    /// User-Agent for SEC requests.
    pub user_agent: String,
    /// What to build.
    pub config: StatementConfig,
}

impl IncomeStatementRequest {
    /// Creates a request for every line item, quarterly, without date bounds.
    pub fn new(cik: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            cik: cik.into(),
            user_agent: user_agent.into(),
            start_date: None,
            end_date: None,
            required_fields: default_required_fields(),
            output_type: default_output_type(),
        }
    }

    /// Sets the date bounds.
    #[must_use]
    pub fn with_dates(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.map(str::to_string);
        self.end_date = end.map(str::to_string);
        self
    }

    /// Sets the requested line items.
    #[must_use]
    pub fn with_fields<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        self.required_fields = fields.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    /// Sets the output type.
    #[must_use]
    pub fn with_output_type(mut self, output_type: &str) -> Self {
        self.output_type = output_type.to_string();
        self
    }

    /// Checks every field and builds the statement configuration.
    ///
    /// Repeated line items are requested once, at their first position.
    pub fn validate(&self) -> Result<ValidatedRequest> {
        let cik = normalize_cik(&self.cik)?;
        if self.user_agent.trim().is_empty() {
            return Err(StatementError::InvalidParameter(
                "user_agent must not be empty".to_string(),
            ));
        }

        let output_type: OutputType = self.output_type.parse()?;
        let start = parse_date(self.start_date.as_deref())?;
        let end = parse_date(self.end_date.as_deref())?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(StatementError::InvalidRange {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }

        if self.required_fields.is_empty() {
            return Err(StatementError::InvalidParameter(
                "required_fields must name at least one line item".to_string(),
            ));
        }
        let mut fields: Vec<LineItem> = Vec::with_capacity(self.required_fields.len());
        for name in &self.required_fields {
            let item: LineItem = name.parse()?;
            if !fields.contains(&item) {
                fields.push(item);
            }
        }

        let mut config = StatementConfig::new()
            .with_fields(fields)
            .with_output_type(output_type);
        if let Some(start) = start {
            config = config.with_start_date(start);
        }
        if let Some(end) = end {
            config = config.with_end_date(end);
        }

        Ok(ValidatedRequest {
            cik,
            user_agent: self.user_agent.trim().to_string(),
            config,
        })
    }
}

/// Parses an optional `YYYY-MM-DD` date; blank text counts as absent.
fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| StatementError::InvalidDate(text.to_string())),
    }
}
