//! The exported CSV must match the rendered table row for row.

use comps_output::{COLUMNS, ComparisonRow, ComparisonTable, ExportFormat, Exporter, SortColumn};

fn rows() -> Vec<ComparisonRow> {
    [
        ("Cisco Systems", "CSCO", Some(2.0e11), Some(14.9)),
        ("Nokia Oyj", "NOK", Some(2.2e10), Some(7.5)),
        ("Ubiquiti Inc.", "UI", Some(2.5e10), None),
        ("Tiny Radio Co", "TINY", Some(850_000.0), Some(-3.0)),
        ("Ghost Ltd", "GHST", None, None),
    ]
    .into_iter()
    .map(|(name, ticker, cap, multiple)| ComparisonRow {
        company_name: name.to_string(),
        ticker: ticker.to_string(),
        sector: "information technology".to_string(),
        market_cap: cap,
        company_multiple: multiple,
        sector_multiple: Some(17.3),
    })
    .collect()
}

#[test]
fn test_csv_round_trip_matches_display() {
    let mut table = ComparisonTable::new("Telecom. Equipment", rows());
    table.sort_by(SortColumn::CompanyMultiple, true);

    let csv = table.export_to_string(ExportFormat::Csv).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(headers, COLUMNS.to_vec());

    let records: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    assert_eq!(records.len(), table.len());

    let displayed: Vec<Vec<String>> = table
        .formatted_rows()
        .iter()
        .map(|r| r.cells().iter().map(|c| c.to_string()).collect())
        .collect();
    assert_eq!(records, displayed);

    let ascii = table.to_ascii_table();
    for record in &records {
        assert!(ascii.contains(&record[1]));
    }
}

#[test]
fn test_small_cap_renders_without_suffix() {
    let table = ComparisonTable::new("Telecom. Equipment", rows());
    let tiny = table
        .formatted_rows()
        .into_iter()
        .find(|r| r.ticker == "TINY")
        .unwrap();
    assert_eq!(tiny.market_cap, "850000");
    assert_eq!(tiny.company_multiple, "-3.0×");
}
