//! Error types for statement operations.
//!
//! This module defines [`StatementError`]. Missing data is never an error here:
//! unmappable concepts are dropped and unresolved cells stay `None`. The
//! variants below cover caller input that fails validation and failures of the
//! fact source.

use thiserror::Error;

/// Errors that can occur when validating requests or fetching facts.
#[derive(Error, Debug)]
pub enum StatementError {
    /// The start date is after the end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested start date.
        start: String,
        /// Requested end date.
        end: String,
    },

    /// The requested output type is not one of `quarterly`, `annual`, `ttm`.
    #[error("Invalid output type: {0} (expected quarterly, annual or ttm)")]
    InvalidOutputType(String),

    /// A requested field does not name a known line item.
    #[error("Unknown line item: {0}")]
    UnknownLineItem(String),

    /// A date could not be parsed as `YYYY-MM-DD`.
    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No fact source is registered.
    #[error("Source not configured: {0}")]
    SourceNotConfigured(String),

    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit still exceeded after all retries.
    #[error("Rate limited: retry after {retry_after:?}")]
    RateLimited {
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// The data source has no facts for the requested company.
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// Error parsing data from the fact source.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error building a DataFrame from a statement.
    #[error("DataFrame error: {0}")]
    Frame(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`StatementError`].
pub type Result<T> = std::result::Result<T, StatementError>;
