//! In-process caching for remote lookups.

pub mod quotes;

pub use quotes::CachedQuoteProvider;
