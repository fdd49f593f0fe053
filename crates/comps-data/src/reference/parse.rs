//! HTML table parsing for the reference page.

use super::{IndustryMultiple, ReferenceTable};
use crate::error::{DataError, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Header fragment marking the aggregate-over-all-firms multiple.
const ALL_FIRMS_MARKER: &str = "all firms";

/// Label fragment marking market-wide aggregate rows.
const TOTAL_MARKET_MARKER: &str = "total market";

/// Parse the first `<table>` of a reference page.
///
/// The first row is the header. The industry is read from the first column
/// and the multiple from the last column whose header mentions "All firms",
/// or from the last column when no header does. Rows whose multiple does not
/// parse as a finite number, and "Total Market" aggregate rows, are dropped.
pub fn parse_reference_html(html: &str) -> Result<ReferenceTable> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("th, td")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| DataError::Parse("no table found in reference page".to_string()))?;

    let mut rows = table
        .select(&row_selector)
        .map(|row| row_cells(row, &cell_selector))
        .filter(|cells| cells.iter().any(|c| !c.is_empty()));

    let header = rows
        .next()
        .ok_or_else(|| DataError::Parse("reference table has no header row".to_string()))?;
    if header.len() < 2 {
        return Err(DataError::Parse(format!(
            "reference table needs at least 2 columns, found {}",
            header.len()
        )));
    }

    let multiple_col = multiple_column(&header);
    debug!(column = %header[multiple_col], "selected reference multiple column");

    let entries: Vec<IndustryMultiple> = rows
        .filter_map(|cells| {
            let industry = cells.first()?;
            if industry.is_empty() || industry.to_lowercase().contains(TOTAL_MARKET_MARKER) {
                return None;
            }
            let multiple = parse_multiple(cells.get(multiple_col)?)?;
            Some(IndustryMultiple::new(industry.clone(), multiple))
        })
        .collect();

    if entries.is_empty() {
        return Err(DataError::Parse(
            "reference table has no usable rows".to_string(),
        ));
    }

    Ok(ReferenceTable::new(entries))
}

/// Collapse whitespace runs (including non-breaking spaces) and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Index of the column holding the reference multiple.
pub(crate) fn multiple_column(header: &[String]) -> usize {
    header
        .iter()
        .rposition(|h| h.to_lowercase().contains(ALL_FIRMS_MARKER))
        .unwrap_or(header.len().saturating_sub(1))
}

/// Coerce a cell to a multiple; anything unparseable is `None`.
pub(crate) fn parse_multiple(cell: &str) -> Option<f64> {
    let cleaned = cell.trim().replace(',', "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn row_cells(row: ElementRef<'_>, cell_selector: &Selector) -> Vec<String> {
    row.select(cell_selector)
        .map(|cell| normalize_whitespace(&cell.text().collect::<String>()))
        .collect()
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::Parse(format!("invalid selector {css}: {e}")))
}
