//! Quote summary response parsing.
//!
//! Only the handful of fields the screener needs are modelled. Yahoo wraps
//! numbers as `{"raw": 1.0, "fmt": "1.00"}` and sends `{}` when a value is
//! unknown, so every field is optional.

use crate::error::{DataError, Result};
use crate::quote::QuoteSnapshot;
use serde::Deserialize;

/// Modules requested from the quote summary endpoint.
pub const SUMMARY_MODULES: &str = "price,summaryDetail,defaultKeyStatistics,assetProfile";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    #[serde(default)]
    result: Option<Vec<SummaryResult>>,
    #[serde(default)]
    error: Option<SummaryError>,
}

#[derive(Debug, Deserialize)]
struct SummaryError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default)]
    summary_detail: Option<SummaryDetail>,
    #[serde(default)]
    default_key_statistics: Option<KeyStatistics>,
    #[serde(default)]
    asset_profile: Option<AssetProfile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    #[serde(default)]
    market_cap: Option<RawValue>,
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    #[serde(default)]
    market_cap: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    #[serde(default)]
    enterprise_to_ebitda: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetProfile {
    #[serde(default)]
    industry: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawValue {
    #[serde(default)]
    raw: Option<f64>,
}

fn raw(value: Option<&RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw).filter(|v| v.is_finite())
}

fn non_empty(text: Option<&String>) -> Option<String> {
    text.map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Turn a quote summary body into a snapshot.
///
/// Market cap comes from the `price` module, falling back to
/// `summaryDetail`. A response carrying an error object or no result is
/// [`DataError::MissingData`].
pub fn parse_quote_summary(symbol: &str, body: &str) -> Result<QuoteSnapshot> {
    let envelope: Envelope = serde_json::from_str(body)?;
    let summary = envelope.quote_summary;

    if let Some(err) = summary.error {
        return Err(DataError::MissingData {
            symbol: symbol.to_string(),
            reason: err
                .description
                .or(err.code)
                .unwrap_or_else(|| "quote summary error".to_string()),
        });
    }

    let result = summary
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DataError::MissingData {
            symbol: symbol.to_string(),
            reason: "empty quote summary".to_string(),
        })?;

    let price = result.price.unwrap_or_default();
    let market_cap = raw(price.market_cap.as_ref()).or_else(|| {
        raw(result
            .summary_detail
            .as_ref()
            .and_then(|d| d.market_cap.as_ref()))
    });
    let multiple = raw(result
        .default_key_statistics
        .as_ref()
        .and_then(|k| k.enterprise_to_ebitda.as_ref()));
    let industry = non_empty(result.asset_profile.as_ref().and_then(|p| p.industry.as_ref()));
    let long_name =
        non_empty(price.long_name.as_ref()).or_else(|| non_empty(price.short_name.as_ref()));

    Ok(QuoteSnapshot {
        symbol: symbol.to_string(),
        market_cap,
        multiple,
        industry,
        long_name,
    })
}
