//! Screening against an in-memory quote provider.

use approx::assert_relative_eq;
use async_trait::async_trait;
use comps::data::{DataError, IndustryMultiple, QuoteProvider, QuoteSnapshot, ReferenceTable};
use comps::screen::{NoMatchStage, ScreenConfig, ScreenOutcome, ScreenRequest, Screener};
use comps::{Company, CompanyUniverse, MarketCapBucket, ScreenError};
use std::collections::HashMap;
use std::sync::Mutex;

const UNIVERSE: &str = "\
Company Name,Ticker,Sector
Cisco Systems (NasdaqGS:CSCO),CSCO,information technology
Arista Networks (NYSE:ANET),ANET,information technology
Nokia Oyj (NYSE:NOK),NOK,information technology
Flaky Networks,FLKY,information technology
Verizon Communications (NYSE:VZ),VZ,communication services
JPMorgan Chase (NYSE:JPM),JPM,financials
SAP SE (XTRA:SAP),SAP.F,information technology
";

#[derive(Default)]
struct StubProvider {
    quotes: HashMap<String, QuoteSnapshot>,
    calls: Mutex<Vec<String>>,
}

impl StubProvider {
    fn with(mut self, symbol: &str, cap: f64, multiple: f64, industry: &str) -> Self {
        self.quotes.insert(
            symbol.to_string(),
            QuoteSnapshot {
                market_cap: Some(cap),
                multiple: Some(multiple),
                industry: Some(industry.to_string()),
                long_name: Some(format!("{symbol} Long Name")),
                ..QuoteSnapshot::empty(symbol)
            },
        );
        self
    }

    fn calls(&self) -> Vec<String> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }
}

#[async_trait]
impl QuoteProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_quote(&self, symbol: &str) -> comps::data::Result<QuoteSnapshot> {
        self.calls.lock().unwrap().push(symbol.to_string());
        self.quotes
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::Http {
                status: 500,
                url: format!("stub://{symbol}"),
            })
    }
}

fn telecom_quotes() -> StubProvider {
    StubProvider::default()
        .with("CSCO", 2.0e11, 14.9, "Communication Equipment")
        .with("ANET", 1.1e11, 35.2, "Computer Hardware")
        .with("NOK", 2.2e10, 7.5, "Communication Equipment")
        .with("VZ", 1.7e11, 7.1, "Telecom Services")
}

fn reference() -> ReferenceTable {
    ReferenceTable::new(vec![
        IndustryMultiple::new("Telecom. Equipment", 17.26),
        IndustryMultiple::new("Semiconductor", 27.44),
        IndustryMultiple::new("Banks (Regional)", 9.1),
    ])
}

fn screener(quotes: StubProvider, config: ScreenConfig) -> Screener<StubProvider> {
    let universe = CompanyUniverse::from_reader(UNIVERSE.as_bytes()).unwrap();
    Screener::new(universe, quotes, config)
}

fn tickers(outcome: &ScreenOutcome) -> Vec<String> {
    outcome
        .matched()
        .unwrap()
        .table
        .rows()
        .iter()
        .map(|r| r.ticker.clone())
        .collect()
}

#[tokio::test]
async fn test_screen_matches_provider_industry() {
    let screener = screener(telecom_quotes(), ScreenConfig::default());
    let request = ScreenRequest::new("telecom. equipment", MarketCapBucket::All);

    let mut seen = 0;
    let outcome = screener
        .screen(&reference(), &request, |_| seen += 1)
        .await
        .unwrap();

    assert_eq!(tickers(&outcome), vec!["CSCO", "NOK"]);
    let result = outcome.matched().unwrap();
    assert_eq!(result.table.industry, "Telecom. Equipment");
    assert_relative_eq!(result.industry_multiple, 17.26);

    let cisco = &result.table.rows()[0];
    assert_eq!(cisco.company_name, "Cisco Systems");
    assert_eq!(cisco.sector, "information technology");
    assert_eq!(cisco.sector_multiple, Some(17.26));

    // Financials are never fetched for a telecom label, foreign listings neither.
    assert_eq!(screener.quotes().calls(), vec!["ANET", "CSCO", "FLKY", "NOK", "VZ"]);
    assert_eq!(seen, 5);
    assert!(outcome.summary().starts_with("2 companies matched"));
}

#[tokio::test]
async fn test_failing_ticker_is_a_null_record() {
    let screener = screener(telecom_quotes(), ScreenConfig::default());
    let request = ScreenRequest::new("Telecom. Equipment", MarketCapBucket::All);

    let outcome = screener.screen(&reference(), &request, |_| {}).await.unwrap();
    let report = outcome.report();

    assert_eq!(report.len(), 5);
    assert_eq!(report.failed_count(), 1);
    let flaky = report.get("FLKY").unwrap();
    assert_eq!(flaky.failure().unwrap().kind, "http");
    let record = flaky.snapshot();
    assert_eq!(record.symbol, "FLKY");
    assert!(record.market_cap.is_none() && record.multiple.is_none());

    assert!(!tickers(&outcome).contains(&"FLKY".to_string()));
}

#[tokio::test]
async fn test_include_unfetched_adds_null_rows() {
    let config = ScreenConfig {
        include_unfetched: true,
        ..ScreenConfig::default()
    };
    let screener = screener(telecom_quotes(), config);
    let request = ScreenRequest::new("Telecom. Equipment", MarketCapBucket::All);

    let outcome = screener.screen(&reference(), &request, |_| {}).await.unwrap();

    assert_eq!(tickers(&outcome), vec!["CSCO", "NOK", "FLKY"]);
    let flaky = &outcome.matched().unwrap().table.rows()[2];
    assert_eq!(flaky.company_name, "Flaky Networks");
    assert!(flaky.market_cap.is_none());
}

#[tokio::test]
async fn test_no_industry_match_is_reported_not_substituted() {
    let screener = screener(telecom_quotes(), ScreenConfig::default());
    let request = ScreenRequest::new("Semiconductor", MarketCapBucket::All);

    let outcome = screener.screen(&reference(), &request, |_| {}).await.unwrap();

    match &outcome {
        ScreenOutcome::NoMatch { stage, report, .. } => {
            assert_eq!(*stage, NoMatchStage::Industry);
            assert!(report.fetched_count() > 0);
        }
        other => panic!("expected NoMatch, got {other:?}"),
    }
    assert!(outcome.matched().is_none());
    assert!(outcome.summary().contains("industry stage"));
}

#[tokio::test]
async fn test_bucket_boundaries_apply_to_matches() {
    let screener = screener(telecom_quotes(), ScreenConfig::default());

    let ultra = ScreenRequest::new("Telecom. Equipment", MarketCapBucket::Ultra);
    let outcome = screener.screen(&reference(), &ultra, |_| {}).await.unwrap();
    assert_eq!(tickers(&outcome), vec!["CSCO"]);

    let large = ScreenRequest::new("Telecom. Equipment", MarketCapBucket::Large);
    let outcome = screener.screen(&reference(), &large, |_| {}).await.unwrap();
    assert_eq!(tickers(&outcome), vec!["NOK"]);

    let mid = ScreenRequest::new("Telecom. Equipment", MarketCapBucket::Mid);
    let outcome = screener.screen(&reference(), &mid, |_| {}).await.unwrap();
    assert!(matches!(
        outcome,
        ScreenOutcome::NoMatch {
            stage: NoMatchStage::MarketCap,
            ..
        }
    ));
}

#[tokio::test]
async fn test_all_fetches_failed() {
    let screener = screener(StubProvider::default(), ScreenConfig::default());
    let request = ScreenRequest::new("Telecom. Equipment", MarketCapBucket::All);

    let outcome = screener.screen(&reference(), &request, |_| {}).await.unwrap();

    match &outcome {
        ScreenOutcome::AllFetchesFailed { report, .. } => {
            assert_eq!(report.len(), 5);
            assert!(report.all_failed());
        }
        other => panic!("expected AllFetchesFailed, got {other:?}"),
    }
    assert!(outcome.summary().contains("failed"));
}

#[tokio::test]
async fn test_unknown_industry() {
    let screener = screener(telecom_quotes(), ScreenConfig::default());
    let request = ScreenRequest::new("Underwater Basket Weaving", MarketCapBucket::All);

    let err = screener.screen(&reference(), &request, |_| {}).await.unwrap_err();

    assert!(matches!(
        err,
        ScreenError::UnknownIndustry(label) if label == "Underwater Basket Weaving"
    ));
    assert!(screener.quotes().calls().is_empty());
}

#[tokio::test]
async fn test_max_tickers_caps_lookups() {
    let config = ScreenConfig {
        max_tickers: 2,
        ..ScreenConfig::default()
    };
    let screener = screener(telecom_quotes(), config);
    let request = ScreenRequest::new("Telecom. Equipment", MarketCapBucket::All);

    let outcome = screener.screen(&reference(), &request, |_| {}).await.unwrap();

    assert_eq!(screener.quotes().calls(), vec!["ANET", "CSCO"]);
    assert_eq!(tickers(&outcome), vec!["CSCO"]);
}

#[tokio::test]
async fn test_company_name_falls_back_to_long_name() {
    let universe = CompanyUniverse::new([Company::new("", "CSCO", "information technology")]);
    let screener = Screener::new(universe, telecom_quotes(), ScreenConfig::default());
    let request = ScreenRequest::new("Telecom. Equipment", MarketCapBucket::All);

    let outcome = screener.screen(&reference(), &request, |_| {}).await.unwrap();

    assert_eq!(outcome.matched().unwrap().table.rows()[0].company_name, "CSCO Long Name");
}

#[test]
fn test_plan_without_fetching() {
    let screener = screener(telecom_quotes(), ScreenConfig::default());
    let plan = screener.plan("Banks (Regional)");

    assert_eq!(plan.tokens, vec!["banks", "regional"]);
    assert_eq!(plan.tickers, vec!["JPM"]);
    assert_eq!(plan.keywords.needles(), &["banks regional"]);
    assert!(screener.quotes().calls().is_empty());
}

#[tokio::test]
async fn test_labels_reach_companies_outside_hinted_sectors() {
    let universe = CompanyUniverse::from_reader(
        "\
Company Name,Ticker,Sector
First Solar (NasdaqGS:FSLR),FSLR,information technology
NextEra Energy (NYSE:NEE),NEE,utilities
W.W. Grainger (NYSE:GWW),GWW,industrials
Corteva (NYSE:CTVA),CTVA,materials
Archer-Daniels-Midland (NYSE:ADM),ADM,consumer staples
"
        .as_bytes(),
    )
    .unwrap();
    let quotes = StubProvider::default()
        .with("FSLR", 2.0e10, 11.0, "Solar")
        .with("NEE", 1.5e11, 14.0, "Utilities - Renewable")
        .with("GWW", 5.0e10, 20.0, "Industrial Distribution")
        .with("CTVA", 4.0e10, 13.0, "Agricultural Inputs")
        .with("ADM", 3.0e10, 9.0, "Farm Products");
    let screener = Screener::new(universe, quotes, ScreenConfig::default());
    let reference = ReferenceTable::new(vec![
        IndustryMultiple::new("Retail (Distributors)", 15.2),
        IndustryMultiple::new("Green & Renewable Energy", 12.1),
        IndustryMultiple::new("Farming/Agriculture", 10.4),
    ]);

    for (label, expected) in [
        ("Retail (Distributors)", vec!["GWW"]),
        ("Green & Renewable Energy", vec!["NEE", "FSLR"]),
        ("Farming/Agriculture", vec!["CTVA", "ADM"]),
    ] {
        let request = ScreenRequest::new(label, MarketCapBucket::All);
        let outcome = screener.screen(&reference, &request, |_| {}).await.unwrap();
        assert_eq!(tickers(&outcome), expected, "{label}");
    }
}
