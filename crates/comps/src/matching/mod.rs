//! Industry label matching.
//!
//! Turns a reference industry label into a broad-sector hint for the
//! universe prefilter and a keyword set for the quote refine stage.

pub mod filter;
pub mod sector_hint;
pub mod synonyms;
pub mod tokens;

pub use filter::{prefilter, prefilter_sectors, refine};
pub use sector_hint::{INDUSTRY_SECTORS, industry_sectors, infer_sectors};
pub use synonyms::{
    FRAGMENT_SYNONYMS, KeywordSet, KeywordSource, LABEL_NEEDLES, canonical_needles, expand,
};
pub use tokens::{STOP_WORDS, normalize_label, tokenize};
