//! Memoizing quote provider.
//!
//! Entries never expire: a snapshot fetched once is reused for the rest of
//! the process. Concurrent requests for the same ticker share one upstream
//! call. Failures are not cached, so a later request retries the ticker.

use crate::error::{DataError, Result};
use crate::quote::{QuoteProvider, QuoteSnapshot};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use tracing::trace;

/// Default maximum number of cached tickers.
pub const DEFAULT_CAPACITY: u64 = 20_000;

/// Wraps a [`QuoteProvider`] with a per-ticker memo cache.
pub struct CachedQuoteProvider<P> {
    inner: P,
    cache: Cache<String, QuoteSnapshot>,
}

impl<P> std::fmt::Debug for CachedQuoteProvider<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedQuoteProvider")
            .field("entries", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

impl<P: QuoteProvider> CachedQuoteProvider<P> {
    /// Wrap a provider with the default capacity.
    pub fn new(inner: P) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    /// Wrap a provider, holding at most `capacity` tickers.
    pub fn with_capacity(inner: P, capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// The wrapped provider.
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    /// Whether a ticker is currently cached.
    pub fn contains(&self, symbol: &str) -> bool {
        self.cache.contains_key(&symbol.to_uppercase())
    }
}

#[async_trait]
impl<P: QuoteProvider> QuoteProvider for CachedQuoteProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot> {
        let key = symbol.to_uppercase();
        if let Some(hit) = self.cache.get(&key).await {
            trace!(symbol, "quote cache hit");
            return Ok(hit);
        }

        self.cache
            .try_get_with(key, self.inner.fetch_quote(symbol))
            .await
            .map_err(|shared| Arc::try_unwrap(shared).unwrap_or_else(DataError::Shared))
    }
}
