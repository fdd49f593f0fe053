//! The screening pipeline.
//!
//! One screen runs, in order:
//!
//! 1. look up the industry's reference multiple,
//! 2. narrow the universe by inferred sector,
//! 3. clean and cap the candidate tickers,
//! 4. fetch quotes in bounded batches,
//! 5. keep quotes whose provider industry matches the label keywords,
//! 6. apply the market-cap bucket,
//! 7. join back to the universe and build the comparison table.
//!
//! An empty result is reported as [`ScreenOutcome::NoMatch`] naming the
//! stage that emptied it. A batch in which every lookup failed is reported
//! separately as [`ScreenOutcome::AllFetchesFailed`].

use crate::bucket::MarketCapBucket;
use crate::matching::{KeywordSet, expand, infer_sectors, prefilter_sectors, refine, tokenize};
use crate::universe::{CompanyUniverse, Sector, clean_tickers};
use comps_data::quote::{DEFAULT_BATCH_SIZE, DEFAULT_CONCURRENCY};
use comps_data::{
    BatchOptions, BatchReport, FetchOutcome, QuoteProvider, ReferenceTable, fetch_batch,
};
use comps_output::{ComparisonRow, ComparisonTable};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Default upper bound on tickers fetched per screen.
pub const DEFAULT_MAX_TICKERS: usize = 600;

/// Errors that stop a screen before any quote is requested.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The label is not in the reference table.
    #[error("Unknown industry: {0}")]
    UnknownIndustry(String),
}

/// Screening limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Upper bound on tickers fetched per screen.
    pub max_tickers: usize,
    /// Tickers per sequential quote batch.
    pub batch_size: usize,
    /// Concurrent quote lookups within a batch.
    pub concurrency: usize,
    /// Add candidates whose quote lookup failed to an unbucketed table.
    pub include_unfetched: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            max_tickers: DEFAULT_MAX_TICKERS,
            batch_size: DEFAULT_BATCH_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            include_unfetched: false,
        }
    }
}

/// What to screen for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenRequest {
    /// Reference industry label.
    pub industry: String,
    /// Market-cap bucket.
    pub bucket: MarketCapBucket,
}

impl ScreenRequest {
    /// Create a request.
    pub fn new(industry: impl Into<String>, bucket: MarketCapBucket) -> Self {
        Self {
            industry: industry.into(),
            bucket,
        }
    }
}

/// How a label is matched, worked out before any quote is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenPlan {
    /// Label tokens.
    pub tokens: Vec<String>,
    /// Inferred broad sectors; empty means the whole universe.
    pub sectors: BTreeSet<Sector>,
    /// Provider industry keywords.
    pub keywords: KeywordSet,
    /// Candidates after the sector prefilter.
    pub candidates: usize,
    /// Tickers to fetch, cleaned and capped.
    pub tickers: Vec<String>,
}

impl ScreenPlan {
    /// Plan a screen of `universe` for `label`, fetching at most
    /// `max_tickers` quotes.
    pub fn new(universe: &CompanyUniverse, label: &str, max_tickers: usize) -> Self {
        let sectors = infer_sectors(label);
        let candidates = prefilter_sectors(universe, &sectors);
        let tickers = clean_tickers(candidates.iter().map(|c| c.ticker.as_str()), max_tickers);
        if tickers.len() == max_tickers && candidates.len() > tickers.len() {
            warn!(
                candidates = candidates.len(),
                max_tickers, "candidate list truncated"
            );
        }

        Self {
            tokens: tokenize(label),
            sectors,
            keywords: expand(label),
            candidates: candidates.len(),
            tickers,
        }
    }
}

/// Stage at which a screen came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchStage {
    /// No candidate tickers left after the sector prefilter and cleanup.
    Candidates,
    /// No fetched quote matched the industry keywords.
    Industry,
    /// Industry matches exist, none in the market-cap bucket.
    MarketCap,
}

impl fmt::Display for NoMatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Candidates => f.write_str("candidate"),
            Self::Industry => f.write_str("industry"),
            Self::MarketCap => f.write_str("market-cap"),
        }
    }
}

/// Result of a screen with at least one company.
#[derive(Debug, Clone)]
pub struct ScreenResult {
    /// Comparison table, market cap descending.
    pub table: ComparisonTable,
    /// Per-ticker fetch outcomes.
    pub report: BatchReport,
    /// Reference multiple of the industry.
    pub industry_multiple: f64,
    /// Keywords the quotes were matched on.
    pub keywords: KeywordSet,
}

/// Outcome of a screen.
#[derive(Debug, Clone)]
pub enum ScreenOutcome {
    /// At least one company matched.
    Matched(Box<ScreenResult>),

    /// Nothing matched.
    NoMatch {
        /// Industry label.
        industry: String,
        /// Stage that emptied the result.
        stage: NoMatchStage,
        /// Per-ticker fetch outcomes, empty if nothing was fetched.
        report: BatchReport,
    },

    /// Every quote lookup failed.
    AllFetchesFailed {
        /// Industry label.
        industry: String,
        /// Per-ticker fetch outcomes.
        report: BatchReport,
    },
}

impl ScreenOutcome {
    /// Matched result, if any.
    pub fn matched(&self) -> Option<&ScreenResult> {
        match self {
            Self::Matched(result) => Some(&**result),
            _ => None,
        }
    }

    /// Per-ticker fetch outcomes.
    pub fn report(&self) -> &BatchReport {
        match self {
            Self::Matched(result) => &result.report,
            Self::NoMatch { report, .. } | Self::AllFetchesFailed { report, .. } => report,
        }
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        let report = self.report();
        match self {
            Self::Matched(result) => format!(
                "{} companies matched '{}' ({} of {} quotes fetched)",
                result.table.len(),
                result.table.industry,
                report.fetched_count(),
                report.len()
            ),
            Self::NoMatch {
                industry, stage, ..
            } => format!(
                "No companies matched '{industry}' at the {stage} stage ({} of {} quotes fetched)",
                report.fetched_count(),
                report.len()
            ),
            Self::AllFetchesFailed { industry, .. } => format!(
                "All {} quote lookups for '{industry}' failed",
                report.len()
            ),
        }
    }
}

/// Screens a company universe against live quotes.
#[derive(Debug)]
pub struct Screener<P> {
    universe: CompanyUniverse,
    quotes: P,
    config: ScreenConfig,
}

impl<P: QuoteProvider> Screener<P> {
    /// Create a screener.
    pub const fn new(universe: CompanyUniverse, quotes: P, config: ScreenConfig) -> Self {
        Self {
            universe,
            quotes,
            config,
        }
    }

    /// The company universe.
    pub const fn universe(&self) -> &CompanyUniverse {
        &self.universe
    }

    /// The quote provider.
    pub const fn quotes(&self) -> &P {
        &self.quotes
    }

    /// Screening limits.
    pub const fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Work out how a label will be matched without fetching anything.
    pub fn plan(&self, label: &str) -> ScreenPlan {
        ScreenPlan::new(&self.universe, label, self.config.max_tickers)
    }

    /// Run a screen.
    ///
    /// `on_outcome` is called once per fetched ticker as results arrive.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::UnknownIndustry`] when the label is not in
    /// `reference`. Quote failures never error; see [`ScreenOutcome`].
    pub async fn screen<F>(
        &self,
        reference: &ReferenceTable,
        request: &ScreenRequest,
        on_outcome: F,
    ) -> Result<ScreenOutcome, ScreenError>
    where
        F: FnMut(&FetchOutcome),
    {
        let entry = reference
            .find(&request.industry)
            .ok_or_else(|| ScreenError::UnknownIndustry(request.industry.clone()))?;
        let industry = entry.industry.clone();
        let plan = self.plan(&industry);
        info!(
            industry = %industry,
            multiple = entry.multiple,
            sectors = ?plan.sectors,
            keywords = ?plan.keywords.needles(),
            tickers = plan.tickers.len(),
            "screen planned"
        );

        if plan.tickers.is_empty() {
            return Ok(ScreenOutcome::NoMatch {
                industry,
                stage: NoMatchStage::Candidates,
                report: BatchReport::default(),
            });
        }

        let options = BatchOptions {
            batch_size: self.config.batch_size,
            concurrency: self.config.concurrency,
        };
        let report = fetch_batch(&self.quotes, &plan.tickers, options, on_outcome).await;
        info!(
            fetched = report.fetched_count(),
            failed = report.failed_count(),
            "quotes fetched"
        );
        if report.all_failed() {
            return Ok(ScreenOutcome::AllFetchesFailed { industry, report });
        }

        let records = report.records();
        let matched = refine(&records, &plan.keywords);
        if matched.is_empty() {
            return Ok(ScreenOutcome::NoMatch {
                industry,
                stage: NoMatchStage::Industry,
                report,
            });
        }

        let in_bucket: Vec<_> = matched
            .into_iter()
            .filter(|q| request.bucket.contains(q.market_cap))
            .collect();
        info!(
            bucket = request.bucket.name(),
            companies = in_bucket.len(),
            "industry matched"
        );
        if in_bucket.is_empty() {
            return Ok(ScreenOutcome::NoMatch {
                industry,
                stage: NoMatchStage::MarketCap,
                report,
            });
        }

        let mut rows: Vec<ComparisonRow> = in_bucket
            .into_iter()
            .map(|q| {
                self.row(
                    &q.symbol,
                    q.long_name.as_deref(),
                    q.market_cap,
                    q.multiple,
                    entry.multiple,
                )
            })
            .collect();
        if self.config.include_unfetched && request.bucket == MarketCapBucket::All {
            rows.extend(
                report
                    .failures()
                    .map(|o| self.row(&o.symbol, None, None, None, entry.multiple)),
            );
        }

        Ok(ScreenOutcome::Matched(Box::new(ScreenResult {
            table: ComparisonTable::new(industry, rows),
            report,
            industry_multiple: entry.multiple,
            keywords: plan.keywords,
        })))
    }

    fn row(
        &self,
        ticker: &str,
        long_name: Option<&str>,
        market_cap: Option<f64>,
        multiple: Option<f64>,
        sector_multiple: f64,
    ) -> ComparisonRow {
        let company = self.universe.get(ticker);
        let company_name = company
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
            .or(long_name)
            .unwrap_or(ticker)
            .to_string();

        ComparisonRow {
            company_name,
            ticker: ticker.to_string(),
            sector: company.map(|c| c.sector_label.clone()).unwrap_or_default(),
            market_cap,
            company_multiple: multiple,
            sector_multiple: Some(sector_multiple),
        }
    }
}
