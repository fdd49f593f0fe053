//! Batch fetching through the cache against a mocked Yahoo endpoint.

use comps_data::quote::{BatchOptions, fetch_batch};
use comps_data::{CachedQuoteProvider, QuoteProvider, YahooConfig, YahooQuoteProvider};
use httpmock::prelude::*;
use std::time::Duration;

fn summary(cap: f64, multiple: f64, industry: &str) -> String {
    format!(
        r#"{{"quoteSummary":{{"result":[{{
            "price":{{"marketCap":{{"raw":{cap}}}}},
            "defaultKeyStatistics":{{"enterpriseToEbitda":{{"raw":{multiple}}}}},
            "assetProfile":{{"industry":"{industry}"}}
        }}],"error":null}}}}"#
    )
}

#[tokio::test]
async fn test_batch_with_partial_failures() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/crumb");
            then.status(200).body("tok");
        })
        .await;
    let cisco = server
        .mock_async(|when, then| {
            when.method(GET).path("/qs/CSCO");
            then.status(200)
                .body(summary(2.0e11, 14.9, "Communication Equipment"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/qs/NOK");
            then.status(200)
                .body(summary(2.2e10, 7.5, "Communication Equipment"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/qs/BROKEN");
            then.status(500);
        })
        .await;

    let yahoo = YahooQuoteProvider::with_config(YahooConfig {
        cookie_url: server.url("/cookie"),
        crumb_url: server.url("/crumb"),
        quote_base_url: server.url("/qs"),
        timeout: Duration::from_secs(5),
        request_delay: Duration::ZERO,
    })
    .unwrap();
    let provider = CachedQuoteProvider::new(yahoo);
    let tickers: Vec<String> = ["CSCO", "BROKEN", "NOK"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let report = fetch_batch(&provider, &tickers, BatchOptions::default(), |_| {}).await;

    assert_eq!(report.len(), 3);
    assert_eq!(report.fetched_count(), 2);
    let broken = report.get("BROKEN").unwrap();
    assert_eq!(broken.failure().unwrap().kind, "http");
    assert!(broken.snapshot().market_cap.is_none());

    // Cached tickers are not requested again.
    provider.fetch_quote("CSCO").await.unwrap();
    cisco.assert_hits_async(1).await;
}
