//! Industry reference multiples.
//!
//! The reference source is a single HTML page with one row per industry and
//! one or more EV/EBITDA columns. It is downloaded once per process and
//! reduced to an industry label → multiple table.
//!
//! # Example
//! ```no_run
//! use comps_data::reference::ReferenceClient;
//!
//! # async fn example() -> comps_data::Result<()> {
//! let client = ReferenceClient::new()?;
//! let table = client.table().await?;
//! for entry in table.entries() {
//!     println!("{:40} {:>6.2}", entry.industry, entry.multiple);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod parse;

pub use client::{DEFAULT_REFERENCE_URL, ReferenceClient, ReferenceConfig};
pub use parse::parse_reference_html;

use serde::{Deserialize, Serialize};

/// One industry and its reference multiple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryMultiple {
    /// Industry label as published by the reference source.
    pub industry: String,
    /// Industry EV/EBITDA.
    pub multiple: f64,
}

impl IndustryMultiple {
    /// Create a new entry.
    pub fn new(industry: impl Into<String>, multiple: f64) -> Self {
        Self {
            industry: industry.into(),
            multiple,
        }
    }
}

/// Industry label → reference multiple, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    entries: Vec<IndustryMultiple>,
}

impl ReferenceTable {
    /// Build a table from entries. Later duplicates of a label are ignored.
    pub fn new(entries: Vec<IndustryMultiple>) -> Self {
        let mut unique: Vec<IndustryMultiple> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !unique.iter().any(|e| e.industry == entry.industry) {
                unique.push(entry);
            }
        }
        Self { entries: unique }
    }

    /// All entries in source order.
    pub fn entries(&self) -> &[IndustryMultiple] {
        &self.entries
    }

    /// Industry labels in source order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.industry.as_str()).collect()
    }

    /// Look up an entry by label.
    ///
    /// Tries an exact match first, then ignores case and whitespace runs.
    pub fn find(&self, label: &str) -> Option<&IndustryMultiple> {
        self.entries
            .iter()
            .find(|e| e.industry == label)
            .or_else(|| {
                let wanted = fold(label);
                self.entries.iter().find(|e| fold(&e.industry) == wanted)
            })
    }

    /// Reference multiple for a label.
    pub fn multiple(&self, label: &str) -> Option<f64> {
        self.find(label).map(|e| e.multiple)
    }

    /// Number of industries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no industries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn fold(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table() -> ReferenceTable {
        ReferenceTable::new(vec![
            IndustryMultiple::new("Advertising", 9.8),
            IndustryMultiple::new("Telecom. Equipment", 17.25),
            IndustryMultiple::new("Advertising", 99.0),
        ])
    }

    #[test]
    fn test_duplicates_keep_first() {
        let table = table();
        assert_eq!(table.len(), 2);
        assert_relative_eq!(table.multiple("Advertising").unwrap(), 9.8);
    }

    #[test]
    fn test_lookup_ignores_case_and_spacing() {
        let table = table();
        assert_relative_eq!(table.multiple("telecom.  equipment").unwrap(), 17.25);
        assert!(table.multiple("Telecom Equipment").is_none());
    }

    #[test]
    fn test_labels_in_order() {
        assert_eq!(table().labels(), vec!["Advertising", "Telecom. Equipment"]);
    }
}
