#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statements/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR fact source.
//!
//! # Example
//!
//! ```no_run
//! use statements_core::FactSource;
//! use statements_edgar::EdgarProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = EdgarProvider::new("MyApp/1.0 (contact@example.com)")?;
//!     let facts = provider.fetch_facts("320193").await?;
//!     println!("{}: {} facts", facts.display_name(), facts.facts.len());
//!     Ok(())
//! }
//! ```

/// Client configuration.
pub mod config;
/// Company facts parsing.
pub mod facts;

pub use config::EdgarConfig;
pub use facts::parse_company_facts;

use async_trait::async_trait;
use reqwest::StatusCode;
use statements_core::{CompanyFacts, FactSource, Result, StatementError, normalize_cik};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, instrument, warn};

/// Rate limiter to ensure we don't exceed SEC's rate limits
#[derive(Debug)]
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// Returns true for statuses worth retrying: throttling and server errors.
fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// SEC EDGAR fact source.
///
/// Fetches the company facts document for a CIK. Requests share one rate
/// limiter, so clones of an `Arc<EdgarProvider>` used from concurrent tasks
/// still respect SEC's 10 requests per second.
#[derive(Debug)]
pub struct EdgarProvider {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    config: EdgarConfig,
}

impl EdgarProvider {
    /// Create a new EDGAR provider with the specified user agent.
    ///
    /// The SEC requires identifying user agent headers. Format should be:
    /// "AppName/Version (contact@email.com)"
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_config(EdgarConfig::new(user_agent))
    }

    /// Create a new EDGAR provider from a full configuration.
    pub fn with_config(config: EdgarConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| StatementError::Network(format!("Failed to build HTTP client: {e}")))?;
        Self::with_client(client, config)
    }

    /// Create a new EDGAR provider with a custom HTTP client.
    ///
    /// The client is used as is; the configured user agent and timeout are
    /// not applied to it.
    pub fn with_client(client: reqwest::Client, config: EdgarConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.min_interval))),
            config,
        })
    }

    /// The active configuration.
    pub const fn config(&self) -> &EdgarConfig {
        &self.config
    }

    /// Fetches a document, retrying throttled, failed and unreachable
    /// requests with exponential backoff.
    async fn get_with_retry(&self, url: &str, cik: &str) -> Result<String> {
        let attempts = self.config.max_retries;
        let mut last_error = StatementError::Network(format!("No attempt made for {url}"));

        for attempt in 0..attempts {
            // Rate limit
            self.rate_limiter.lock().await.wait().await;

            debug!(url, attempt, "Fetching company facts");
            match self.client.get(url).send().await {
                Ok(response) if response.status().is_success() => {
                    return response
                        .text()
                        .await
                        .map_err(|e| StatementError::Network(e.to_string()));
                }
                Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                    return Err(StatementError::CompanyNotFound(cik.to_string()));
                }
                Ok(response) if is_retryable(response.status()) => {
                    let status = response.status();
                    let delay = self.config.retry_delay(attempt);
                    last_error = if status == StatusCode::TOO_MANY_REQUESTS {
                        StatementError::RateLimited {
                            retry_after: Some(delay),
                        }
                    } else {
                        StatementError::Network(format!("HTTP {status} for CIK {cik}"))
                    };
                    warn!(%status, attempt, ?delay, "Retrying SEC request");
                }
                Ok(response) => {
                    return Err(StatementError::Network(format!(
                        "Failed to fetch company facts for CIK {}: HTTP {}",
                        cik,
                        response.status()
                    )));
                }
                Err(e) => {
                    warn!(error = %e, attempt, "SEC request failed");
                    last_error = StatementError::Network(e.to_string());
                }
            }

            if attempt + 1 < attempts {
                sleep(self.config.retry_delay(attempt)).await;
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl FactSource for EdgarProvider {
    fn name(&self) -> &str {
        "SEC EDGAR"
    }

    #[instrument(skip(self), fields(source = "SEC EDGAR"))]
    async fn fetch_facts(&self, cik: &str) -> Result<CompanyFacts> {
        let cik = normalize_cik(cik)?;
        let url = self.config.company_facts_url(&cik);
        let body = self.get_with_retry(&url, &cik).await?;
        let mut facts = parse_company_facts(&body)?;
        if facts.cik.is_empty() {
            facts.cik = cik;
        }
        Ok(facts)
    }
}

// =============================================================================
// Tests
// =============================================================================
