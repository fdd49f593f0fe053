//! Reference industry label → provider industry keywords.
//!
//! Reference labels ("Telecom. Equipment") and provider industries
//! ("Communication Equipment") come from unrelated taxonomies. Known labels
//! resolve through [`LABEL_NEEDLES`]; anything else falls back to label
//! tokens, each widened through [`FRAGMENT_SYNONYMS`].
//!
//! Needles are stored normalized (see [`normalize_label`]) and matched
//! against normalized provider text, so punctuation differences such as
//! `"Banks - Regional"` versus `"Banks—Regional"` do not matter.

use crate::matching::tokens::{normalize_label, tokenize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Canonical table: reference industry label → provider industry needles.
pub const LABEL_NEEDLES: &[(&str, &[&str])] = &[
    ("Advertising", &["advertising agencies"]),
    ("Aerospace/Defense", &["aerospace & defense"]),
    ("Air Transport", &["airlines", "airports & air services"]),
    ("Apparel", &["apparel manufacturing", "apparel retail", "luxury goods"]),
    ("Auto & Truck", &["auto manufacturers", "farm & heavy construction machinery"]),
    ("Auto Parts", &["auto parts"]),
    ("Bank (Money Center)", &["banks - diversified"]),
    ("Banks (Regional)", &["banks - regional"]),
    ("Beverage (Alcoholic)", &["beverages - brewers", "beverages - wineries & distilleries"]),
    ("Beverage (Soft)", &["beverages - non-alcoholic"]),
    ("Broadcasting", &["broadcasting"]),
    ("Brokerage & Investment Banking", &["capital markets"]),
    ("Building Materials", &["building materials", "building products & equipment"]),
    (
        "Business & Consumer Services",
        &[
            "specialty business services",
            "personal services",
            "consulting services",
            "rental & leasing services",
        ],
    ),
    ("Cable TV", &["telecom services", "entertainment"]),
    ("Chemical (Basic)", &["chemicals"]),
    ("Chemical (Diversified)", &["chemicals", "specialty chemicals"]),
    ("Chemical (Specialty)", &["specialty chemicals"]),
    ("Coal & Related Energy", &["thermal coal", "coking coal"]),
    ("Computer Services", &["information technology services"]),
    ("Computers/Peripherals", &["computer hardware", "consumer electronics"]),
    ("Construction Supplies", &["building materials", "building products & equipment"]),
    ("Diversified", &["conglomerates"]),
    ("Drugs (Biotechnology)", &["biotechnology"]),
    ("Drugs (Pharmaceutical)", &["drug manufacturers"]),
    ("Education", &["education & training services"]),
    ("Electrical Equipment", &["electrical equipment & parts"]),
    ("Electronics (Consumer & Office)", &["consumer electronics"]),
    ("Electronics (General)", &["electronic components", "scientific & technical instruments"]),
    ("Engineering/Construction", &["engineering & construction", "infrastructure operations"]),
    ("Entertainment", &["entertainment"]),
    ("Environmental & Waste Services", &["waste management", "pollution & treatment controls"]),
    ("Farming/Agriculture", &["farm products", "agricultural inputs"]),
    (
        "Financial Svcs. (Non-bank & Insurance)",
        &[
            "credit services",
            "financial conglomerates",
            "mortgage finance",
        ],
    ),
    ("Food Processing", &["packaged foods", "confectioners"]),
    ("Food Wholesalers", &["food distribution"]),
    ("Furn/Home Furnishings", &["furnishings, fixtures & appliances"]),
    ("Green & Renewable Energy", &["solar", "utilities - renewable"]),
    ("Healthcare Products", &["medical devices", "medical instruments & supplies"]),
    (
        "Healthcare Support Services",
        &[
            "healthcare plans",
            "medical distribution",
            "medical care facilities",
        ],
    ),
    ("Heathcare Information and Technology", &["health information services"]),
    ("Healthcare Information and Technology", &["health information services"]),
    ("Homebuilding", &["residential construction"]),
    ("Hospitals/Healthcare Facilities", &["medical care facilities"]),
    ("Hotel/Gaming", &["lodging", "resorts & casinos", "gambling"]),
    ("Household Products", &["household & personal products"]),
    ("Information Services", &["financial data & stock exchanges", "consulting services"]),
    ("Insurance (General)", &["insurance - diversified", "insurance - property & casualty"]),
    ("Insurance (Life)", &["insurance - life"]),
    ("Insurance (Prop/Cas.)", &["insurance - property & casualty"]),
    ("Investments & Asset Management", &["asset management"]),
    (
        "Machinery",
        &[
            "specialty industrial machinery",
            "farm & heavy construction machinery",
            "tools & accessories",
        ],
    ),
    ("Metals & Mining", &["industrial metals & mining", "copper", "aluminum"]),
    ("Office Equipment & Services", &["business equipment & supplies"]),
    ("Oil/Gas (Integrated)", &["oil & gas integrated"]),
    ("Oil/Gas (Production and Exploration)", &["oil & gas e&p"]),
    ("Oil/Gas Distribution", &["oil & gas midstream"]),
    ("Oilfield Svcs/Equip.", &["oil & gas equipment & services", "oil & gas drilling"]),
    ("Packaging & Container", &["packaging & containers"]),
    ("Paper/Forest Products", &["paper & paper products", "lumber & wood production"]),
    (
        "Power",
        &[
            "utilities - regulated electric",
            "utilities - independent power producers",
            "utilities - diversified",
        ],
    ),
    ("Precious Metals", &["gold", "silver", "other precious metals"]),
    ("Publishing & Newspapers", &["publishing"]),
    ("R.E.I.T.", &["reit"]),
    ("Real Estate (Development)", &["real estate - development"]),
    ("Real Estate (General/Diversified)", &["real estate - diversified", "real estate services"]),
    ("Real Estate (Operations & Services)", &["real estate services"]),
    ("Recreation", &["leisure", "recreational vehicles"]),
    ("Reinsurance", &["insurance - reinsurance"]),
    ("Restaurant/Dining", &["restaurants"]),
    ("Retail (Automotive)", &["auto & truck dealerships"]),
    ("Retail (Building Supply)", &["home improvement retail"]),
    ("Retail (Distributors)", &["industrial distribution", "electronics & computer distribution"]),
    ("Retail (General)", &["discount stores", "department stores"]),
    ("Retail (Online)", &["internet retail"]),
    ("Retail (Grocery and Food)", &["grocery stores"]),
    ("Retail (REITs)", &["reit - retail"]),
    ("Retail (Special Lines)", &["specialty retail", "internet retail"]),
    ("Rubber& Tires", &["rubber & plastics", "auto parts"]),
    ("Semiconductor", &["semiconductors"]),
    ("Semiconductor Equip", &["semiconductor equipment & materials"]),
    ("Shipbuilding & Marine", &["marine shipping"]),
    ("Shoe", &["footwear & accessories"]),
    ("Software (Entertainment)", &["electronic gaming & multimedia"]),
    ("Software (Internet)", &["internet content & information", "software - application"]),
    ("Software (System & Application)", &["software - infrastructure", "software - application"]),
    ("Steel", &["steel"]),
    ("Telecom (Wireless)", &["telecom services"]),
    ("Telecom. Equipment", &["communication equipment"]),
    ("Telecom. Services", &["telecom services"]),
    ("Tobacco", &["tobacco"]),
    ("Transportation", &["integrated freight & logistics", "trucking"]),
    ("Transportation (Railroads)", &["railroads"]),
    ("Trucking", &["trucking"]),
    ("Utility (General)", &["utilities - diversified", "utilities - regulated"]),
    ("Utility (Water)", &["utilities - regulated water"]),
];

/// Fallback table: label token → provider industry needles.
///
/// Tokens absent from this table are used as needles verbatim.
pub const FRAGMENT_SYNONYMS: &[(&str, &[&str])] = &[
    ("pharmaceutical", &["drug manufacturers", "pharmaceutical"]),
    ("pharma", &["drug manufacturers"]),
    ("drugs", &["drug manufacturers", "biotechnology"]),
    ("biotech", &["biotechnology"]),
    ("telecom", &["telecom", "communication equipment"]),
    ("bank", &["banks"]),
    ("banking", &["banks", "capital markets"]),
    ("healthcare", &["medical", "health"]),
    ("hotel", &["lodging", "resorts & casinos"]),
    ("gaming", &["gambling", "resorts & casinos", "electronic gaming"]),
    ("restaurant", &["restaurants"]),
    ("dining", &["restaurants"]),
    ("power", &["utilities"]),
    ("utility", &["utilities"]),
    ("oil", &["oil & gas"]),
    ("chemical", &["chemicals"]),
    ("beverage", &["beverages"]),
    ("homebuilding", &["residential construction"]),
    ("transportation", &["freight", "trucking", "railroads"]),
    ("computer", &["computer hardware", "information technology services"]),
    ("computers", &["computer hardware"]),
    ("electronics", &["electronic"]),
    ("recreation", &["leisure"]),
    ("farming", &["farm products"]),
    ("agriculture", &["agricultural inputs", "farm products"]),
    ("shoe", &["footwear"]),
    ("reit", &["reit"]),
    ("reits", &["reit"]),
    ("internet", &["internet content", "internet retail"]),
    ("wireless", &["telecom services"]),
];

static CANONICAL: LazyLock<HashMap<String, &'static [&'static str]>> = LazyLock::new(|| {
    LABEL_NEEDLES
        .iter()
        .map(|(label, needles)| (normalize_label(label), *needles))
        .collect()
});

static FRAGMENTS: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| FRAGMENT_SYNONYMS.iter().copied().collect());

/// Where a keyword set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordSource {
    /// The label is in the canonical table.
    Canonical,
    /// Derived from label tokens.
    Fallback,
}

impl fmt::Display for KeywordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical => f.write_str("canonical"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Provider industry needles for one reference label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    needles: Vec<String>,
    source: KeywordSource,
}

impl KeywordSet {
    fn from_needles<'a>(needles: impl IntoIterator<Item = &'a str>, source: KeywordSource) -> Self {
        let mut set = Self {
            needles: Vec::new(),
            source,
        };
        for needle in needles {
            let needle = normalize_label(needle);
            if !needle.is_empty() && !set.needles.contains(&needle) {
                set.needles.push(needle);
            }
        }
        set
    }

    /// Needles in first-seen order.
    pub fn needles(&self) -> &[String] {
        &self.needles
    }

    /// Where the needles came from.
    pub const fn source(&self) -> KeywordSource {
        self.source
    }

    /// Whether there is nothing to match on.
    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }

    /// Whether provider industry text contains any needle, ignoring case
    /// and punctuation.
    pub fn matches(&self, industry: &str) -> bool {
        let haystack = normalize_label(industry);
        !haystack.is_empty() && self.needles.iter().any(|n| haystack.contains(n.as_str()))
    }
}

/// Raw needles of a canonical label, ignoring case and punctuation.
pub fn canonical_needles(label: &str) -> Option<&'static [&'static str]> {
    CANONICAL.get(&normalize_label(label)).copied()
}

/// Expand a reference label into provider industry needles.
///
/// ```
/// use comps::matching::{KeywordSource, expand};
///
/// let keywords = expand("Telecom. Equipment");
/// assert_eq!(keywords.source(), KeywordSource::Canonical);
/// assert!(keywords.matches("Communication Equipment"));
/// assert!(!keywords.matches("Telecom Services"));
/// ```
pub fn expand(label: &str) -> KeywordSet {
    if let Some(needles) = canonical_needles(label) {
        return KeywordSet::from_needles(needles.iter().copied(), KeywordSource::Canonical);
    }

    let tokens = tokenize(label);
    let needles = tokens.iter().flat_map(|token| match FRAGMENTS.get(token.as_str()) {
        Some(synonyms) => synonyms.to_vec(),
        None => vec![token.as_str()],
    });
    KeywordSet::from_needles(needles, KeywordSource::Fallback)
}
