//! Human-readable number formatting.
//!
//! All functions here are total: missing or non-finite input renders as
//! [`NOT_AVAILABLE`] instead of failing.

/// Placeholder for missing values.
pub const NOT_AVAILABLE: &str = "N/A";

const TRILLION: f64 = 1e12;
const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;

/// Format a market capitalization.
///
/// Values are scaled to the largest of trillions, billions or millions with
/// two decimals and a `T`/`B`/`M` suffix; anything below a million is
/// printed as a whole number without suffix.
///
/// ```
/// use comps_output::fmt_mcap;
///
/// assert_eq!(fmt_mcap(Some(1.5e9)), "1.50B");
/// assert_eq!(fmt_mcap(Some(999.0)), "999");
/// assert_eq!(fmt_mcap(None), "N/A");
/// ```
pub fn fmt_mcap(value: Option<f64>) -> String {
    let Some(x) = value.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };

    if x >= TRILLION {
        format!("{:.2}T", x / TRILLION)
    } else if x >= BILLION {
        format!("{:.2}B", x / BILLION)
    } else if x >= MILLION {
        format!("{:.2}M", x / MILLION)
    } else {
        format!("{x:.0}")
    }
}

/// Format a valuation multiple with one decimal and a `×` suffix.
///
/// ```
/// use comps_output::fmt_mult;
///
/// assert_eq!(fmt_mult(Some(12.345)), "12.3×");
/// assert_eq!(fmt_mult(None), "N/A");
/// ```
pub fn fmt_mult(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map_or_else(|| NOT_AVAILABLE.to_string(), |x| format!("{x:.1}×"))
}

/// Coerce free text to a number; anything unparseable becomes `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
