#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/comps/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod quote;
pub mod reference;
pub mod yahoo;

pub use cache::CachedQuoteProvider;
pub use error::{DataError, Result};
pub use quote::{
    BatchOptions, BatchReport, FetchFailure, FetchOutcome, QuoteProvider, QuoteSnapshot,
    fetch_batch,
};
pub use reference::{IndustryMultiple, ReferenceClient, ReferenceConfig, ReferenceTable};
pub use yahoo::{YahooConfig, YahooQuoteProvider};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
