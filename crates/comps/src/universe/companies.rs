//! Static company table.
//!
//! The table is CSV with the headers `Company Name`, `Ticker` and `Sector`.
//! Extra columns are ignored and rows missing any of the three fields are
//! dropped. Tickers are unique: the first row for a ticker wins.

use crate::universe::sector::Sector;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// Sample universe compiled into the binary.
const EMBEDDED_COMPANIES: &str = include_str!("../../data/companies.csv");

const REQUIRED_COLUMNS: [&str; 3] = ["Company Name", "Ticker", "Sector"];

/// Trailing exchange tag such as `" (NasdaqGS:AAPL)"`.
static NAME_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]+\)$").expect("Invalid regex pattern"));

/// Foreign listings and OTC tickers the quote provider serves poorly.
static BAD_TICKER_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(F|Q|SA|BO|PA|SG|MI|BR|VX|V|BA)$").expect("Invalid regex pattern")
});

/// Errors raised while loading a company universe.
#[derive(Debug, Error)]
pub enum UniverseError {
    /// IO error.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File being read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required header is absent.
    #[error("Missing column '{0}' in company table")]
    MissingColumn(&'static str),

    /// No usable rows.
    #[error("Company table has no usable rows")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct CompanyRecord {
    #[serde(rename = "Company Name")]
    name: Option<String>,
    #[serde(rename = "Ticker")]
    ticker: Option<String>,
    #[serde(rename = "Sector")]
    sector: Option<String>,
}

/// A listed company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    /// Display name, exchange tag removed.
    pub name: String,
    /// Ticker symbol.
    pub ticker: String,
    /// Sector label as written in the source table.
    pub sector_label: String,
    /// Broad sector, when the label names one.
    pub sector: Option<Sector>,
}

impl Company {
    /// Create a company, cleaning the name and parsing the sector label.
    pub fn new(
        name: impl AsRef<str>,
        ticker: impl Into<String>,
        sector_label: impl Into<String>,
    ) -> Self {
        let sector_label = sector_label.into();
        Self {
            name: strip_name_suffix(name.as_ref()),
            ticker: ticker.into(),
            sector: Sector::parse_label(&sector_label),
            sector_label,
        }
    }
}

/// Immutable set of companies keyed by ticker.
#[derive(Debug, Clone)]
pub struct CompanyUniverse {
    companies: Vec<Company>,
    by_ticker: HashMap<String, usize>,
}

impl CompanyUniverse {
    /// Build a universe from companies. Later duplicates of a ticker are
    /// discarded.
    pub fn new(companies: impl IntoIterator<Item = Company>) -> Self {
        let mut kept = Vec::new();
        let mut by_ticker = HashMap::new();
        for company in companies {
            if by_ticker.contains_key(&company.ticker) {
                debug!(ticker = %company.ticker, "duplicate ticker dropped");
                continue;
            }
            by_ticker.insert(company.ticker.clone(), kept.len());
            kept.push(company);
        }
        Self {
            companies: kept,
            by_ticker,
        }
    }

    /// The sample universe shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded table is malformed.
    pub fn embedded() -> Result<Self, UniverseError> {
        Self::from_reader(EMBEDDED_COMPANIES.as_bytes())
    }

    /// Load a universe from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a required column is
    /// missing, or no row is usable.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, UniverseError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| UniverseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let universe = Self::from_reader(file)?;
        debug!(path = %path.display(), companies = universe.len(), "loaded company universe");
        Ok(universe)
    }

    /// Load a universe from CSV data.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed CSV, a missing required column, or when
    /// no row is usable.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, UniverseError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(UniverseError::MissingColumn(column));
            }
        }

        let mut companies = Vec::new();
        for record in rdr.deserialize::<CompanyRecord>() {
            let record = record?;
            let (Some(name), Some(ticker), Some(sector)) = (
                non_empty(record.name),
                non_empty(record.ticker),
                non_empty(record.sector),
            ) else {
                continue;
            };
            companies.push(Company::new(name, ticker, sector));
        }

        if companies.is_empty() {
            return Err(UniverseError::Empty);
        }
        Ok(Self::new(companies))
    }

    /// All companies in load order.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Company for a ticker.
    pub fn get(&self, ticker: &str) -> Option<&Company> {
        self.by_ticker.get(ticker).map(|&i| &self.companies[i])
    }

    /// All tickers in load order.
    pub fn tickers(&self) -> Vec<String> {
        self.companies.iter().map(|c| c.ticker.clone()).collect()
    }

    /// Number of companies.
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    /// Whether the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Companies in a broad sector.
    pub fn companies_in_sector(&self, sector: Sector) -> Vec<&Company> {
        self.companies
            .iter()
            .filter(|c| c.sector == Some(sector))
            .collect()
    }

    /// Company count per sector label, as written in the source table.
    pub fn sector_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for company in &self.companies {
            *counts.entry(company.sector_label.clone()).or_insert(0) += 1;
        }
        counts
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Remove a trailing parenthetical tag from a company name.
pub fn strip_name_suffix(name: &str) -> String {
    NAME_SUFFIX.replace(name.trim(), "").trim().to_string()
}

/// Whether a ticker carries a foreign-exchange or OTC suffix.
pub fn has_bad_suffix(ticker: &str) -> bool {
    BAD_TICKER_SUFFIX.is_match(ticker.trim())
}

/// Trim tickers, drop foreign/OTC listings and duplicates, and keep at most
/// `max` of them. Order is preserved.
pub fn clean_tickers<I, S>(tickers: I, max: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tickers
        .into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty() && !has_bad_suffix(t))
        .filter(|t| seen.insert(t.clone()))
        .take(max)
        .collect()
}
