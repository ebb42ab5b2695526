//! Fact source trait.
//!
//! A [`FactSource`] supplies the raw facts the engine consumes. Fetching
//! (network access, retries, rate limits) happens entirely behind this trait
//! and strictly before normalization begins.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::Result, types::CompanyFacts};

/// Source of raw filing facts for a company.
#[async_trait]
pub trait FactSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "SEC EDGAR").
    fn name(&self) -> &str;

    /// Fetches every reported fact for the company identified by `cik`.
    ///
    /// Returns [`StatementError::CompanyNotFound`](crate::StatementError::CompanyNotFound)
    /// when the source has no record of the company.
    async fn fetch_facts(&self, cik: &str) -> Result<CompanyFacts>;
}
