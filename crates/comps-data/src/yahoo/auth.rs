//! Cookie and crumb handshake for Yahoo Finance.
//!
//! Quote summary requests need a session cookie (set by visiting the cookie
//! URL) and a crumb token passed as a query parameter. The crumb is fetched
//! once per provider; the outcome, success or failure, is kept so a broken
//! handshake fails every ticker immediately instead of being repeated.

use crate::error::{DataError, Result};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Longest response accepted as a crumb.
const MAX_CRUMB_LEN: usize = 100;

/// Memoized crumb token.
#[derive(Debug, Default)]
pub(crate) struct CrumbStore {
    crumb: OnceCell<std::result::Result<String, String>>,
}

impl CrumbStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Crumb for this session, performing the handshake on first use.
    pub(crate) async fn crumb(
        &self,
        client: &reqwest::Client,
        cookie_url: &str,
        crumb_url: &str,
    ) -> Result<String> {
        let outcome = self
            .crumb
            .get_or_init(|| async {
                handshake(client, cookie_url, crumb_url)
                    .await
                    .map_err(|e| e.to_string())
            })
            .await;

        outcome.clone().map_err(DataError::Auth)
    }
}

async fn handshake(client: &reqwest::Client, cookie_url: &str, crumb_url: &str) -> Result<String> {
    // The cookie endpoint usually answers 404 but still sets the session cookie.
    if let Err(e) = client
        .get(cookie_url)
        .header("referer", "https://finance.yahoo.com/")
        .send()
        .await
    {
        warn!(error = %e, "cookie request failed; continuing without session cookie");
    }

    let response = client
        .get(crumb_url)
        .header("referer", "https://finance.yahoo.com/")
        .send()
        .await?;
    let status = response.status();
    if status.as_u16() == 429 {
        return Err(DataError::RateLimit("crumb".to_string()));
    }
    if !status.is_success() {
        return Err(DataError::Http {
            status: status.as_u16(),
            url: crumb_url.to_string(),
        });
    }

    let body = response.text().await?;
    let crumb = validate_crumb(&body)?;
    debug!("obtained Yahoo crumb");
    Ok(crumb)
}

/// Check that a crumb response looks like a token and not an error page.
pub(crate) fn validate_crumb(body: &str) -> Result<String> {
    let crumb = body.trim();
    let lower = crumb.to_lowercase();
    if crumb.is_empty()
        || crumb.len() > MAX_CRUMB_LEN
        || crumb.contains(char::is_whitespace)
        || lower.contains("<html")
        || lower.contains("<!doctype")
    {
        return Err(DataError::Auth(format!(
            "unexpected crumb response ({} bytes)",
            body.len()
        )));
    }
    Ok(crumb.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_crumb() {
        assert_eq!(validate_crumb("abc.DEF/123\n").unwrap(), "abc.DEF/123");
        assert!(validate_crumb("").is_err());
        assert!(validate_crumb("Too Many Requests").is_err());
        assert!(validate_crumb("<!DOCTYPE html><html></html>").is_err());
        assert!(validate_crumb(&"x".repeat(200)).is_err());
    }
}
