//! Client configuration.

use statements_core::{Result, StatementError};
use std::time::Duration;

/// SEC EDGAR API base URL
pub const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// Default rate limit: 10 requests per second (SEC requirement)
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default backoff base in seconds; attempt `n` waits `base^(n+1)`
pub const DEFAULT_BACKOFF_BASE: f64 = 1.5;

/// Settings for [`EdgarProvider`](crate::EdgarProvider).
#[derive(Debug, Clone, PartialEq)]
pub struct EdgarConfig {
    /// Identifying User-Agent, e.g. `"MyApp/1.0 (contact@example.com)"`.
    pub user_agent: String,
    /// API base URL without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum number of attempts per request.
    pub max_retries: u32,
    /// Exponential backoff base, in seconds.
    pub backoff_base: f64,
    /// Minimum spacing between requests.
    pub min_interval: Duration,
}

impl EdgarConfig {
    /// Creates a configuration with SEC defaults.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            base_url: EDGAR_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: DEFAULT_BACKOFF_BASE,
            min_interval: DEFAULT_RATE_LIMIT,
        }
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum number of attempts per request.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff base in seconds.
    #[must_use]
    pub const fn with_backoff_base(mut self, backoff_base: f64) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    /// Sets the minimum spacing between requests.
    #[must_use]
    pub const fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Checks that the configuration can be used.
    pub fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(StatementError::InvalidParameter(
                "SEC requests need a User-Agent identifying the caller".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(StatementError::InvalidParameter(
                "max_retries must be at least 1".to_string(),
            ));
        }
        if !self.backoff_base.is_finite() || self.backoff_base < 0.0 {
            return Err(StatementError::InvalidParameter(format!(
                "Invalid backoff base: {}",
                self.backoff_base
            )));
        }
        Ok(())
    }

    /// Delay before retrying after failed attempt `attempt` (zero-based).
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_add(1)).unwrap_or(i32::MAX);
        Duration::try_from_secs_f64(self.backoff_base.powi(exponent)).unwrap_or(Duration::MAX)
    }

    /// Company facts URL for a normalized CIK.
    pub fn company_facts_url(&self, cik: &str) -> String {
        format!("{}/api/xbrl/companyfacts/CIK{}.json", self.base_url, cik)
    }
}
