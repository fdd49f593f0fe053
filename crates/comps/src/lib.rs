#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/comps/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bucket;
pub mod matching;
pub mod screen;
pub mod universe;

// Re-export sub-crates
pub use comps_data as data;
pub use comps_output as output;

pub use bucket::MarketCapBucket;
pub use screen::{ScreenConfig, ScreenError, ScreenOutcome, ScreenRequest, Screener};
pub use universe::{Company, CompanyUniverse, Sector, UniverseError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
