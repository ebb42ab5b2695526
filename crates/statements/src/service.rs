//! Income statement service over one or more fact sources with fallback behavior.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use statements_core::{CompanyFacts, FactSource, Result, StatementError};
use statements_engine::{IncomeStatement, StatementConfig, build_income_statement};

use crate::request::IncomeStatementRequest;
use crate::response::IncomeStatementResponse;

/// Builds income statements from registered fact sources.
///
/// Sources are tried in registration order until one returns the company's
/// facts; the first success wins.
///
/// # Example
///
/// ```rust,ignore
/// use statements::{IncomeStatementService, StatementConfig};
///
/// let service = IncomeStatementService::new()
///     .with_edgar("MyApp/1.0 (contact@example.com)")?;
///
/// let statement = service.build("320193", &StatementConfig::new()).await?;
/// println!("{} periods", statement.periods.len());
/// ```
#[derive(Default)]
pub struct IncomeStatementService {
    sources: Vec<Arc<dyn FactSource>>,
}

impl std::fmt::Debug for IncomeStatementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncomeStatementService")
            .field("sources", &self.source_names())
            .finish()
    }
}

impl IncomeStatementService {
    /// Create a new service with no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fact source.
    pub fn register(&mut self, source: Arc<dyn FactSource>) {
        debug!(source = source.name(), "Registering fact source");
        self.sources.push(source);
    }

    /// Register a fact source, builder style.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn FactSource>) -> Self {
        self.register(source);
        self
    }

    /// Add the SEC EDGAR source.
    #[cfg(feature = "edgar")]
    pub fn with_edgar(self, user_agent: &str) -> Result<Self> {
        let provider = statements_edgar::EdgarProvider::new(user_agent)?;
        Ok(self.with_source(Arc::new(provider)))
    }

    /// Names of the registered sources, in fallback order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Fetch a company's facts, trying sources in order until one succeeds.
    pub async fn fetch_facts(&self, cik: &str) -> Result<CompanyFacts> {
        if self.sources.is_empty() {
            return Err(StatementError::SourceNotConfigured(
                "No fact sources registered".to_string(),
            ));
        }

        let mut last_error = None;
        for source in &self.sources {
            debug!(source = source.name(), cik, "Fetching company facts");

            match source.fetch_facts(cik).await {
                Ok(facts) => return Ok(facts),
                Err(e) => {
                    warn!(
                        source = source.name(),
                        error = %e,
                        "Source failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| StatementError::Other("All sources failed with no error".to_string())))
    }

    /// Build one company's income statement.
    #[instrument(skip(self, config), fields(output_type = %config.output_type))]
    pub async fn build(&self, cik: &str, config: &StatementConfig) -> Result<IncomeStatement> {
        let facts = self.fetch_facts(cik).await?;
        debug!(
            company = facts.display_name(),
            facts = facts.facts.len(),
            "Building income statement"
        );
        Ok(build_income_statement(
            facts.display_name(),
            &facts.facts,
            config,
        ))
    }

    /// Build income statements for several companies concurrently.
    ///
    /// Results are returned in the order of `ciks`; one company failing does
    /// not affect the others.
    pub async fn build_many(
        &self,
        ciks: &[&str],
        config: &StatementConfig,
    ) -> Vec<Result<IncomeStatement>> {
        debug!(companies = ciks.len(), "Building income statements");
        join_all(ciks.iter().map(|cik| self.build(cik, config))).await
    }

    /// Validate a request and answer it.
    ///
    /// The response echoes the CIK as the caller sent it.
    pub async fn respond(&self, request: &IncomeStatementRequest) -> Result<IncomeStatementResponse> {
        let validated = request.validate()?;
        let statement = self.build(&validated.cik, &validated.config).await?;
        Ok(IncomeStatementResponse::success(&request.cik, statement))
    }
}

/// Answer a request against SEC EDGAR, identifying as the request's user agent.
#[cfg(feature = "edgar")]
pub async fn income_statement(request: &IncomeStatementRequest) -> Result<IncomeStatementResponse> {
    let validated = request.validate()?;
    IncomeStatementService::new()
        .with_edgar(&validated.user_agent)?
        .respond(request)
        .await
}
