//! Industry label tokenizer.

use std::collections::HashSet;

/// Words too generic to discriminate between industries.
pub const STOP_WORDS: [&str; 13] = [
    "and",
    "services",
    "service",
    "general",
    "other",
    "lines",
    "line",
    "systems",
    "application",
    "apps",
    "svcs",
    "the",
    "for",
];

/// Fragments this short are abbreviation debris ("co", "e.", "&").
const MIN_TOKEN_LEN: usize = 3;

/// Split an industry label into lowercase keyword tokens.
///
/// Every non-alphanumeric character separates tokens. Fragments of two
/// characters or fewer and [`STOP_WORDS`] are dropped, and duplicates are
/// removed keeping the first occurrence.
///
/// ```
/// use comps::matching::tokenize;
///
/// assert_eq!(tokenize("Telecom. Equipment"), vec!["telecom", "equipment"]);
/// assert_eq!(
///     tokenize("Oil/Gas (Production and Exploration)"),
///     vec!["oil", "gas", "production", "exploration"]
/// );
/// ```
pub fn tokenize(label: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    separate(label)
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN)
        .filter(|w| !STOP_WORDS.contains(w))
        .filter(|w| seen.insert(w.to_string()))
        .map(str::to_string)
        .collect()
}

/// Lowercase, replace punctuation by spaces and collapse whitespace.
///
/// This is the lookup key for canonical label tables, so
/// `"Telecom. Equipment"` and `"telecom equipment"` normalize identically.
pub fn normalize_label(label: &str) -> String {
    separate(label).split_whitespace().collect::<Vec<_>>().join(" ")
}

fn separate(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect()
}
