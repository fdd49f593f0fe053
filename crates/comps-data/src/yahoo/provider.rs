//! Quote summary provider for Yahoo Finance.

use super::auth::CrumbStore;
use super::summary::{SUMMARY_MODULES, parse_quote_summary};
use crate::error::{DataError, Result};
use crate::quote::{QuoteProvider, QuoteSnapshot};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Browser-like user agent; Yahoo rejects unknown agents.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// Yahoo endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YahooConfig {
    /// Page that sets the session cookie.
    pub cookie_url: String,
    /// Endpoint returning the crumb token.
    pub crumb_url: String,
    /// Base URL of the quote summary endpoint (symbol is appended).
    pub quote_base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Pause after each quote request.
    pub request_delay: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            cookie_url: "https://fc.yahoo.com".to_string(),
            crumb_url: "https://query1.finance.yahoo.com/v1/test/getcrumb".to_string(),
            quote_base_url: "https://query2.finance.yahoo.com/v10/finance/quoteSummary"
                .to_string(),
            timeout: Duration::from_secs(15),
            request_delay: Duration::from_millis(100),
        }
    }
}

/// Yahoo Finance quote provider.
pub struct YahooQuoteProvider {
    client: reqwest::Client,
    config: YahooConfig,
    crumb: CrumbStore,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a provider with default endpoints.
    pub fn new() -> Result<Self> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a provider with custom endpoints and pacing.
    pub fn with_config(config: YahooConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            config,
            crumb: CrumbStore::new(),
        })
    }

    /// Settings in use.
    pub const fn config(&self) -> &YahooConfig {
        &self.config
    }

    fn summary_url(&self, symbol: &str) -> String {
        format!(
            "{}/{}",
            self.config.quote_base_url.trim_end_matches('/'),
            symbol
        )
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let crumb = self
            .crumb
            .crumb(&self.client, &self.config.cookie_url, &self.config.crumb_url)
            .await?;

        let url = self.summary_url(symbol);
        debug!(symbol, "requesting quote summary");
        let response = self
            .client
            .get(&url)
            .query(&[("modules", SUMMARY_MODULES), ("crumb", crumb.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !self.config.request_delay.is_zero() {
            sleep(self.config.request_delay).await;
        }

        match status.as_u16() {
            200..=299 => parse_quote_summary(symbol, &body),
            404 => Err(match parse_quote_summary(symbol, &body) {
                Err(e @ DataError::MissingData { .. }) => e,
                _ => DataError::MissingData {
                    symbol: symbol.to_string(),
                    reason: "not found".to_string(),
                },
            }),
            429 => Err(DataError::RateLimit(symbol.to_string())),
            401 | 403 => Err(DataError::Auth(format!("quote request rejected ({status})"))),
            code => Err(DataError::Http { status: code, url }),
        }
    }
}
