//! Yahoo Finance data providers.

pub mod auth;
pub mod provider;
pub mod summary;

pub use provider::{YahooConfig, YahooQuoteProvider};
pub use summary::parse_quote_summary;
