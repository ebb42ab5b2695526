#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statements/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Fact normalization and period derivation engine.
//!
//! [`build_income_statement`] runs the whole pipeline. Each stage is also
//! public for callers that need intermediate results:
//!
//! - [`ConceptMapper`] - Taxonomy tag to line item
//! - [`PeriodResolver`] - Deduplication and quarter reconstruction
//! - [`DerivationEngine`] - Accounting identity gap filling
//! - [`aggregate()`] - Quarterly, annual and TTM projection with date filtering
//! - [`format_value`] - Display strings

/// Projection into the output granularity.
pub mod aggregate;
/// Statement configuration.
pub mod config;
/// Accounting identities.
pub mod derivation;
/// Display formatting.
pub mod format;
/// Concept tag mapping.
pub mod mapper;
/// Output types.
pub mod output;
/// Period resolution.
pub mod resolver;

pub use aggregate::{Projection, aggregate, trailing};
pub use config::StatementConfig;
pub use derivation::{DerivationEngine, DerivationRule, RULES, Term};
pub use format::{format_count_short, format_usd_short, format_value};
pub use mapper::ConceptMapper;
pub use output::{Cell, IncomeStatement, LineSeries};
pub use resolver::{PeriodResolver, PeriodTable, resolve_periods};

use statements_core::RawFact;
use tracing::instrument;

/// Resolves and derives every fiscal period of `facts`.
#[must_use]
pub fn normalize(facts: &[RawFact]) -> PeriodTable {
    let mut table = resolve_periods(facts);
    DerivationEngine::new().derive_all(&mut table);
    table
}

/// Builds an aligned income statement from one company's raw facts.
///
/// Never fails: unresolvable cells are `None` and periods without any
/// requested value are left out.
#[must_use]
#[instrument(skip(facts, config), fields(facts = facts.len(), output_type = %config.output_type))]
pub fn build_income_statement(
    company_name: &str,
    facts: &[RawFact],
    config: &StatementConfig,
) -> IncomeStatement {
    let table = normalize(facts);
    let projection = aggregate(&table, config);
    IncomeStatement::from_projection(company_name, config.output_type, projection)
}
