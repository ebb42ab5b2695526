#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statements/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for income statement normalization.
//!
//! This crate provides the foundational abstractions:
//!
//! - [`RawFact`](types::RawFact) - One reported number from a filing
//! - [`LineItem`](line_item::LineItem) - Canonical income-statement identifiers
//! - [`PeriodKey`](period::PeriodKey) / [`PeriodRecord`](period::PeriodRecord) - Resolved fiscal periods
//! - [`OutputType`](frequency::OutputType) - Quarterly, annual or TTM granularity
//! - [`FactSource`](provider::FactSource) - Where raw facts come from

/// Error types for statement operations.
pub mod error;
/// Output granularity and fact duration classes.
pub mod frequency;
/// Canonical income-statement line items.
pub mod line_item;
/// Fiscal period keys and per-period records.
pub mod period;
/// Fact source trait.
pub mod provider;
/// Raw fact types (RawFact, FormType, FiscalPeriod, CompanyFacts) and CIK handling.
pub mod types;

// Re-export commonly used items at crate root
pub use error::{Result, StatementError};
pub use frequency::{DurationClass, OutputType};
pub use line_item::{LineItem, ValueKind};
pub use period::{PeriodKey, PeriodRecord};
pub use provider::FactSource;
pub use types::{CompanyFacts, FiscalPeriod, FormType, RawFact, normalize_cik};
