#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statements/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Normalized income statements from SEC XBRL company facts.
//!
//! This crate re-exports the core types and the normalization engine, and
//! provides an [`IncomeStatementService`] that fetches facts from one or more
//! [`FactSource`]s with automatic fallback before building the statement.
//!
//! # Features
//!
//! - `edgar` - SEC EDGAR company facts source (default)
//!
//! # Example
//!
//! ```rust,ignore
//! use statements::{IncomeStatementRequest, income_statement};
//!
//! #[tokio::main]
//! async fn main() -> statements::Result<()> {
//!     let request = IncomeStatementRequest::new("320193", "MyApp/1.0 (contact@example.com)")
//!         .with_fields(&["Total Revenues", "Net Income", "Diluted EPS"])
//!         .with_output_type("ttm");
//!
//!     let response = income_statement(&request).await?;
//!     println!("{:?}", response.statement.periods);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use statements_core::*;

// Engine
pub use statements_engine::{
    Cell, ConceptMapper, DerivationEngine, DerivationRule, IncomeStatement, LineSeries,
    PeriodResolver, PeriodTable, Projection, RULES, StatementConfig, Term, aggregate,
    build_income_statement, format_count_short, format_usd_short, format_value, normalize,
    resolve_periods, trailing,
};

// Sources
#[cfg(feature = "edgar")]
pub use statements_edgar::{EdgarConfig, EdgarProvider, parse_company_facts};

/// DataFrame export.
pub mod frame;
/// Request model and validation.
pub mod request;
/// Response model.
pub mod response;
mod service;

pub use frame::to_dataframe;
pub use request::{IncomeStatementRequest, ValidatedRequest};
pub use response::IncomeStatementResponse;
#[cfg(feature = "edgar")]
pub use service::income_statement;
pub use service::IncomeStatementService;
