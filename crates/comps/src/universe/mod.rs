//! Company universe and broad-sector taxonomy.
//!
//! The universe is a static table of listed companies, each tagged with a
//! free-text sector label. It is loaded once and never mutated.

pub mod companies;
pub mod sector;

pub use companies::{Company, CompanyUniverse, UniverseError, clean_tickers};
pub use sector::Sector;

