//! Market-cap buckets.

use std::fmt;
use std::str::FromStr;

const SMALL_MAX: f64 = 2e9;
const MID_MAX: f64 = 10e9;
const LARGE_MAX: f64 = 50e9;
const MEGA_MAX: f64 = 200e9;

/// Market-capitalization range. Ranges are half-open: lower bound
/// inclusive, upper bound exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarketCapBucket {
    /// No filtering.
    #[default]
    All,
    /// Below $2B.
    Small,
    /// $2B to $10B.
    Mid,
    /// $10B to $50B.
    Large,
    /// $50B to $200B.
    Mega,
    /// $200B and above.
    Ultra,
}

impl MarketCapBucket {
    /// All buckets, [`Self::All`] first then ascending.
    pub const fn all() -> [Self; 6] {
        [
            Self::All,
            Self::Small,
            Self::Mid,
            Self::Large,
            Self::Mega,
            Self::Ultra,
        ]
    }

    /// Lower (inclusive) and upper (exclusive) bounds.
    pub const fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            Self::All => (None, None),
            Self::Small => (None, Some(SMALL_MAX)),
            Self::Mid => (Some(SMALL_MAX), Some(MID_MAX)),
            Self::Large => (Some(MID_MAX), Some(LARGE_MAX)),
            Self::Mega => (Some(LARGE_MAX), Some(MEGA_MAX)),
            Self::Ultra => (Some(MEGA_MAX), None),
        }
    }

    /// Whether a market cap falls in this bucket.
    ///
    /// A missing or NaN market cap belongs only to [`Self::All`].
    pub fn contains(&self, market_cap: Option<f64>) -> bool {
        if *self == Self::All {
            return true;
        }
        let Some(cap) = market_cap.filter(|v| !v.is_nan()) else {
            return false;
        };
        let (lower, upper) = self.bounds();
        lower.is_none_or(|lo| cap >= lo) && upper.is_none_or(|hi| cap < hi)
    }

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "Show All Companies",
            Self::Small => "Small Cap (<$2B)",
            Self::Mid => "Mid Cap ($2B–$10B)",
            Self::Large => "Large Cap ($10B–$50B)",
            Self::Mega => "Mega Cap ($50B–$200B)",
            Self::Ultra => "Ultra Cap (>$200B)",
        }
    }

    /// Command-line name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Small => "small",
            Self::Mid => "mid",
            Self::Large => "large",
            Self::Mega => "mega",
            Self::Ultra => "ultra",
        }
    }
}

impl fmt::Display for MarketCapBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MarketCapBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        let name = normalized.strip_suffix("-cap").unwrap_or(&normalized);
        Self::all()
            .into_iter()
            .find(|b| b.name() == name)
            .ok_or_else(|| {
                format!(
                    "unknown market-cap bucket '{s}' (expected one of: {})",
                    Self::all().map(|b| b.name()).join(", ")
                )
            })
    }
}
