//! Reference page client with a process-lifetime cache.

use super::{ReferenceTable, parse::parse_reference_html};
use crate::error::{DataError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Damodaran's EV/EBITDA-by-industry page (US).
pub const DEFAULT_REFERENCE_URL: &str =
    "https://pages.stern.nyu.edu/~adamodar/New_Home_Page/datafile/vebitda.html";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent for reference page requests
const USER_AGENT: &str = "comps/0.1 (valuation multiple screener)";

/// Reference source settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceConfig {
    /// Page holding the industry table.
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REFERENCE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Downloads and memoizes the reference table.
///
/// [`ReferenceClient::table`] fetches on first use and then returns the same
/// table for the life of the client. Concurrent first calls share a single
/// download. A failed download is not remembered.
pub struct ReferenceClient {
    client: reqwest::Client,
    config: ReferenceConfig,
    table: OnceCell<Arc<ReferenceTable>>,
}

impl std::fmt::Debug for ReferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceClient")
            .field("config", &self.config)
            .field("loaded", &self.table.initialized())
            .finish_non_exhaustive()
    }
}

impl ReferenceClient {
    /// Create a client for the default reference page.
    pub fn new() -> Result<Self> {
        Self::with_config(ReferenceConfig::default())
    }

    /// Create a client with custom settings.
    pub fn with_config(config: ReferenceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            config,
            table: OnceCell::new(),
        })
    }

    /// Settings in use.
    pub const fn config(&self) -> &ReferenceConfig {
        &self.config
    }

    /// The reference table, downloaded on first call and cached afterwards.
    pub async fn table(&self) -> Result<Arc<ReferenceTable>> {
        self.table
            .get_or_try_init(|| async { self.fetch_table().await.map(Arc::new) })
            .await
            .map(Arc::clone)
    }

    /// Download and parse the reference table, bypassing the cache.
    pub async fn fetch_table(&self) -> Result<ReferenceTable> {
        debug!(url = %self.config.url, "fetching reference table");

        let response = self.client.get(&self.config.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                url: self.config.url.clone(),
            });
        }

        let body = response.text().await?;
        let table = parse_reference_html(&body)?;
        info!(industries = table.len(), "loaded reference table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const PAGE: &str = "<table>\
        <tr><td>Industry Name</td><td>EV/EBITDA (All firms)</td></tr>\
        <tr><td>Advertising</td><td>9.81</td></tr>\
        <tr><td>Steel</td><td>6.50</td></tr>\
        </table>";

    fn client_for(server: &MockServer) -> ReferenceClient {
        ReferenceClient::with_config(ReferenceConfig {
            url: server.url("/vebitda.html"),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_table_is_fetched_once() {
        let server = MockServer::start_async().await;
        let page = server
            .mock_async(|when, then| {
                when.method(GET).path("/vebitda.html");
                then.status(200)
                    .header("content-type", "text/html")
                    .body(PAGE);
            })
            .await;

        let client = client_for(&server);
        let first = client.table().await.unwrap();
        let second = client.table().await.unwrap();

        assert_eq!(first.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        page.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/vebitda.html");
                then.status(503);
            })
            .await;

        let client = client_for(&server);
        let err = client.table().await.unwrap_err();

        assert!(matches!(err, DataError::Http { status: 503, .. }));
    }

    #[test]
    fn test_default_config() {
        let config = ReferenceConfig::default();
        assert_eq!(config.url, DEFAULT_REFERENCE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
