//! Company vs. industry comparison table.

use crate::format::{fmt_mcap, fmt_mult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Displayed and exported column headers, in order.
pub const COLUMNS: [&str; 6] = [
    "Company Name",
    "Ticker",
    "Sector",
    "Market Cap",
    "Company Multiple",
    "Sector Multiple",
];

/// One company with raw (unformatted) values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Company name.
    pub company_name: String,
    /// Ticker symbol.
    pub ticker: String,
    /// Sector label from the company universe.
    pub sector: String,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Company EV/EBITDA.
    pub company_multiple: Option<f64>,
    /// Industry reference EV/EBITDA.
    pub sector_multiple: Option<f64>,
}

impl ComparisonRow {
    /// Render the row as display strings.
    pub fn formatted(&self) -> FormattedRow {
        FormattedRow {
            company_name: self.company_name.clone(),
            ticker: self.ticker.clone(),
            sector: self.sector.clone(),
            market_cap: fmt_mcap(self.market_cap),
            company_multiple: fmt_mult(self.company_multiple),
            sector_multiple: fmt_mult(self.sector_multiple),
        }
    }
}

/// A row as displayed and exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedRow {
    /// Company name.
    #[serde(rename = "Company Name")]
    pub company_name: String,
    /// Ticker symbol.
    #[serde(rename = "Ticker")]
    pub ticker: String,
    /// Sector label.
    #[serde(rename = "Sector")]
    pub sector: String,
    /// Formatted market cap.
    #[serde(rename = "Market Cap")]
    pub market_cap: String,
    /// Formatted company multiple.
    #[serde(rename = "Company Multiple")]
    pub company_multiple: String,
    /// Formatted industry multiple.
    #[serde(rename = "Sector Multiple")]
    pub sector_multiple: String,
}

impl FormattedRow {
    /// Cells in [`COLUMNS`] order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.company_name.as_str(),
            self.ticker.as_str(),
            self.sector.as_str(),
            self.market_cap.as_str(),
            self.company_multiple.as_str(),
            self.sector_multiple.as_str(),
        ]
    }
}

/// Column to sort a table by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Market capitalization.
    #[default]
    MarketCap,
    /// Company multiple.
    CompanyMultiple,
    /// Company name.
    CompanyName,
    /// Ticker.
    Ticker,
    /// Sector label.
    Sector,
}

impl SortColumn {
    /// All sortable columns.
    pub const fn all() -> [Self; 5] {
        [
            Self::MarketCap,
            Self::CompanyMultiple,
            Self::CompanyName,
            Self::Ticker,
            Self::Sector,
        ]
    }

    /// Command-line name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MarketCap => "market-cap",
            Self::CompanyMultiple => "multiple",
            Self::CompanyName => "name",
            Self::Ticker => "ticker",
            Self::Sector => "sector",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "market-cap" | "mcap" | "cap" => Ok(Self::MarketCap),
            "multiple" | "company-multiple" | "ev-ebitda" => Ok(Self::CompanyMultiple),
            "name" | "company" | "company-name" => Ok(Self::CompanyName),
            "ticker" | "symbol" => Ok(Self::Ticker),
            "sector" => Ok(Self::Sector),
            _ => Err(format!(
                "unknown sort column '{s}' (expected one of: {})",
                Self::all().map(|c| c.name()).join(", ")
            )),
        }
    }
}

/// Comparison table for one industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    /// Industry label the table was built for.
    pub industry: String,
    rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Create a table, sorted by market cap descending.
    pub fn new(industry: impl Into<String>, rows: Vec<ComparisonRow>) -> Self {
        let mut table = Self {
            industry: industry.into(),
            rows,
        };
        table.sort_by(SortColumn::MarketCap, true);
        table
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// Number of rows.
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sort rows on raw values. Missing values always sort last.
    pub fn sort_by(&mut self, column: SortColumn, descending: bool) {
        self.rows.sort_by(|a, b| {
            let ord = match column {
                SortColumn::MarketCap => {
                    return cmp_nulls_last(a.market_cap, b.market_cap, descending);
                }
                SortColumn::CompanyMultiple => {
                    return cmp_nulls_last(a.company_multiple, b.company_multiple, descending);
                }
                SortColumn::CompanyName => a
                    .company_name
                    .to_lowercase()
                    .cmp(&b.company_name.to_lowercase()),
                SortColumn::Ticker => a.ticker.cmp(&b.ticker),
                SortColumn::Sector => a.sector.to_lowercase().cmp(&b.sector.to_lowercase()),
            };
            if descending { ord.reverse() } else { ord }
        });
    }

    /// Rows as display strings, in display order.
    pub fn formatted_rows(&self) -> Vec<FormattedRow> {
        self.rows.iter().map(ComparisonRow::formatted).collect()
    }

    /// Render as a fixed-width text table.
    pub fn to_ascii_table(&self) -> String {
        let formatted = self.formatted_rows();
        let mut widths = COLUMNS.map(|c| c.chars().count());
        for row in &formatted {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let total_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);

        let mut output = String::new();
        output.push_str(&format!("\nIndustry: {}\n", self.industry));
        output.push_str(&"=".repeat(total_width));
        output.push('\n');
        output.push_str(&render_line(&COLUMNS, &widths));
        output.push_str(&"-".repeat(total_width));
        output.push('\n');
        for row in &formatted {
            output.push_str(&render_line(&row.cells(), &widths));
        }
        output.push_str(&"-".repeat(total_width));
        output.push('\n');
        output.push_str(&format!("{} companies\n", self.len()));
        output
    }
}

fn cmp_nulls_last(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    let a = a.filter(|v| !v.is_nan());
    let b = b.filter(|v| !v.is_nan());
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if descending { ord.reverse() } else { ord }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Text columns are left-aligned, numeric columns right-aligned.
fn render_line(cells: &[&str; 6], widths: &[usize; 6]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i < 3 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}
