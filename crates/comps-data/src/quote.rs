//! Per-ticker quote snapshots and batch fetching.
//!
//! A [`QuoteProvider`] answers one ticker at a time. [`fetch_batch`] fans
//! the lookups out over a bounded number of workers and collects one
//! [`FetchOutcome`] per requested ticker, so a failing ticker is reported
//! alongside the others instead of aborting the batch.

use crate::error::{DataError, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default number of tickers per sequential batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default number of concurrent lookups within a batch.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Live financial metrics for a single ticker.
///
/// Every field except the symbol may be missing; consumers treat `None` as
/// "unknown" and never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Ticker symbol (join key against the company universe).
    pub symbol: String,
    /// Market capitalization in the quote currency.
    pub market_cap: Option<f64>,
    /// Company EV/EBITDA multiple, unvalidated (may be negative).
    pub multiple: Option<f64>,
    /// Provider industry classification, free text.
    pub industry: Option<String>,
    /// Provider long name.
    pub long_name: Option<String>,
}

impl QuoteSnapshot {
    /// Create a snapshot with every financial field unknown.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            market_cap: None,
            multiple: None,
            industry: None,
            long_name: None,
        }
    }
}

/// Source of live per-ticker quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable provider name, used in logs.
    fn name(&self) -> &str;

    /// Fetch the snapshot for one ticker.
    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot>;
}

#[async_trait]
impl<P> QuoteProvider for Arc<P>
where
    P: QuoteProvider + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot> {
        (**self).fetch_quote(symbol).await
    }
}

/// Reason a single ticker lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    /// Error class, see [`DataError::kind`].
    pub kind: String,
    /// Display form of the underlying error.
    pub message: String,
}

impl From<&DataError> for FetchFailure {
    fn from(err: &DataError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result of looking up one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// Requested ticker.
    pub symbol: String,
    /// Snapshot on success, tagged failure otherwise.
    pub result: std::result::Result<QuoteSnapshot, FetchFailure>,
}

impl FetchOutcome {
    /// Successful lookup. The snapshot is re-keyed to the requested ticker.
    pub fn fetched(symbol: impl Into<String>, mut snapshot: QuoteSnapshot) -> Self {
        let symbol = symbol.into();
        snapshot.symbol.clone_from(&symbol);
        Self {
            symbol,
            result: Ok(snapshot),
        }
    }

    /// Failed lookup.
    pub fn failed(symbol: impl Into<String>, err: &DataError) -> Self {
        Self {
            symbol: symbol.into(),
            result: Err(FetchFailure::from(err)),
        }
    }

    /// Whether the lookup succeeded.
    pub const fn is_fetched(&self) -> bool {
        self.result.is_ok()
    }

    /// Failure reason, if the lookup failed.
    pub const fn failure(&self) -> Option<&FetchFailure> {
        match &self.result {
            Ok(_) => None,
            Err(f) => Some(f),
        }
    }

    /// Snapshot for this ticker; failures degrade to an all-null record.
    pub fn snapshot(&self) -> QuoteSnapshot {
        match &self.result {
            Ok(s) => s.clone(),
            Err(_) => QuoteSnapshot::empty(self.symbol.clone()),
        }
    }
}

/// Outcomes of a batch lookup, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    outcomes: Vec<FetchOutcome>,
}

impl BatchReport {
    /// Wrap a list of outcomes.
    pub const fn new(outcomes: Vec<FetchOutcome>) -> Self {
        Self { outcomes }
    }

    /// All outcomes in request order.
    pub fn outcomes(&self) -> &[FetchOutcome] {
        &self.outcomes
    }

    /// One record per requested ticker; failures appear with null fields.
    pub fn records(&self) -> Vec<QuoteSnapshot> {
        self.outcomes.iter().map(FetchOutcome::snapshot).collect()
    }

    /// Outcome for a ticker.
    pub fn get(&self, symbol: &str) -> Option<&FetchOutcome> {
        self.outcomes.iter().find(|o| o.symbol == symbol)
    }

    /// Failed outcomes only.
    pub fn failures(&self) -> impl Iterator<Item = &FetchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_fetched())
    }

    /// Number of tickers requested.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether nothing was requested.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of successful lookups.
    pub fn fetched_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_fetched()).count()
    }

    /// Number of failed lookups.
    pub fn failed_count(&self) -> usize {
        self.len() - self.fetched_count()
    }

    /// True when at least one ticker was requested and none succeeded.
    pub fn all_failed(&self) -> bool {
        !self.is_empty() && self.fetched_count() == 0
    }
}

/// Batching limits for [`fetch_batch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Tickers per sequential batch.
    pub batch_size: usize,
    /// Concurrent lookups within a batch.
    pub concurrency: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Fetch quotes for many tickers.
///
/// Tickers are split into sequential batches of `batch_size`; within a batch
/// at most `concurrency` lookups are in flight. `on_outcome` is called once
/// per ticker as results arrive (completion order). The returned report is
/// in request order and always holds exactly one outcome per ticker.
pub async fn fetch_batch<P, F>(
    provider: &P,
    symbols: &[String],
    options: BatchOptions,
    mut on_outcome: F,
) -> BatchReport
where
    P: QuoteProvider + ?Sized,
    F: FnMut(&FetchOutcome),
{
    let batch_size = options.batch_size.max(1);
    let concurrency = options.concurrency.max(1);
    let mut slots: Vec<Option<FetchOutcome>> = vec![None; symbols.len()];

    debug!(
        provider = provider.name(),
        tickers = symbols.len(),
        batch_size,
        concurrency,
        "starting quote batch"
    );

    for (batch_index, chunk) in symbols.chunks(batch_size).enumerate() {
        let offset = batch_index * batch_size;
        let mut results = stream::iter(chunk.iter().enumerate())
            .map(|(i, symbol)| async move {
                let result = provider.fetch_quote(symbol).await;
                (offset + i, symbol, result)
            })
            .buffer_unordered(concurrency);

        while let Some((index, symbol, result)) = results.next().await {
            let outcome = match result {
                Ok(snapshot) => FetchOutcome::fetched(symbol.as_str(), snapshot),
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "quote fetch failed");
                    FetchOutcome::failed(symbol.as_str(), &e)
                }
            };
            on_outcome(&outcome);
            slots[index] = Some(outcome);
        }
    }

    BatchReport::new(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MapProvider {
        quotes: HashMap<String, QuoteSnapshot>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QuoteProvider for MapProvider {
        fn name(&self) -> &str {
            "map"
        }

        async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.quotes
                .get(symbol)
                .cloned()
                .ok_or_else(|| DataError::MissingData {
                    symbol: symbol.to_string(),
                    reason: "not in map".to_string(),
                })
        }
    }

    fn provider() -> MapProvider {
        let mut quotes = HashMap::new();
        for (symbol, cap) in [("AAPL", 3.0e12), ("MSFT", 2.8e12), ("CSCO", 2.0e11)] {
            quotes.insert(
                symbol.to_string(),
                QuoteSnapshot {
                    symbol: symbol.to_string(),
                    market_cap: Some(cap),
                    multiple: Some(20.0),
                    industry: Some("Consumer Electronics".to_string()),
                    long_name: None,
                },
            );
        }
        MapProvider {
            quotes,
            calls: AtomicUsize::new(0),
        }
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_fetch_batch_keeps_request_order() {
        let provider = provider();
        let tickers = symbols(&["MSFT", "NOPE", "AAPL", "CSCO"]);
        let options = BatchOptions {
            batch_size: 3,
            concurrency: 2,
        };

        let report = fetch_batch(&provider, &tickers, options, |_| {}).await;

        let order: Vec<&str> = report.outcomes().iter().map(|o| o.symbol.as_str()).collect();
        assert_eq!(order, vec!["MSFT", "NOPE", "AAPL", "CSCO"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_failed_ticker_is_null_record() {
        let provider = provider();
        let tickers = symbols(&["AAPL", "NOPE"]);

        let report = fetch_batch(&provider, &tickers, BatchOptions::default(), |_| {}).await;

        assert_eq!(report.len(), 2);
        assert_eq!(report.fetched_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_failed());

        let records = report.records();
        assert_eq!(records[1], QuoteSnapshot::empty("NOPE"));

        let failure = report.get("NOPE").and_then(FetchOutcome::failure).unwrap();
        assert_eq!(failure.kind, "missing");
    }

    #[tokio::test]
    async fn test_all_failed() {
        let provider = provider();
        let tickers = symbols(&["X1", "X2"]);

        let report = fetch_batch(&provider, &tickers, BatchOptions::default(), |_| {}).await;

        assert!(report.all_failed());
        assert_eq!(report.failures().count(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch_is_not_all_failed() {
        let provider = provider();
        let report = fetch_batch(&provider, &[], BatchOptions::default(), |_| {}).await;
        assert!(report.is_empty());
        assert!(!report.all_failed());
    }

    #[tokio::test]
    async fn test_progress_callback_counts_every_ticker() {
        let provider = provider();
        let tickers = symbols(&["AAPL", "MSFT", "BAD"]);
        let mut seen = 0;

        fetch_batch(&provider, &tickers, BatchOptions::default(), |_| seen += 1).await;

        assert_eq!(seen, 3);
    }

    #[test]
    fn test_fetched_rekeys_symbol() {
        let outcome = FetchOutcome::fetched("BRK-B", QuoteSnapshot::empty("brk-b"));
        assert_eq!(outcome.snapshot().symbol, "BRK-B");
    }
}
