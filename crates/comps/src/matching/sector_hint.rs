//! Best-effort broad sector inference from an industry label.
//!
//! Used only to shrink the universe before quotes are requested. Results
//! are never authoritative: an empty set means "no idea", not "none".
//!
//! Labels from the canonical table also contribute the sectors their
//! provider industries live in, so a label is never narrowed away from the
//! companies its own needles target.

use crate::matching::synonyms::canonical_needles;
use crate::matching::tokens::tokenize;
use crate::universe::Sector;
use std::collections::BTreeSet;

use Sector::{
    CommunicationServices, ConsumerDiscretionary, ConsumerStaples, Energy, Financials, HealthCare,
    Industrials, InformationTechnology, Materials, RealEstate, Utilities,
};

/// Token prefix → sectors the label may belong to.
const SECTOR_HINTS: &[(&str, &[Sector])] = &[
    // Financials
    ("bank", &[Financials]),
    ("brokerage", &[Financials]),
    ("insur", &[Financials]),
    ("reinsur", &[Financials]),
    ("invest", &[Financials]),
    ("financ", &[Financials]),
    ("asset", &[Financials]),
    // Real estate
    ("reit", &[RealEstate]),
    ("estate", &[RealEstate]),
    // Health care
    ("drug", &[HealthCare]),
    ("pharma", &[HealthCare]),
    ("biotech", &[HealthCare]),
    ("health", &[HealthCare]),
    ("heathcare", &[HealthCare]),
    ("hospital", &[HealthCare]),
    ("medical", &[HealthCare]),
    // Information technology
    ("semicond", &[InformationTechnology]),
    ("software", &[InformationTechnology, CommunicationServices]),
    ("computer", &[InformationTechnology]),
    ("electronic", &[InformationTechnology]),
    ("telecom", &[CommunicationServices, InformationTechnology]),
    // Communication services
    ("broadcast", &[CommunicationServices]),
    ("cable", &[CommunicationServices]),
    ("entertain", &[CommunicationServices]),
    ("advertis", &[CommunicationServices]),
    ("publish", &[CommunicationServices]),
    ("newspaper", &[CommunicationServices]),
    // Energy
    ("oil", &[Energy]),
    ("gas", &[Energy, Utilities]),
    ("coal", &[Energy]),
    ("renewable", &[Energy, Utilities]),
    // Utilities
    ("power", &[Utilities]),
    ("utilit", &[Utilities]),
    ("water", &[Utilities]),
    // Materials
    ("chemical", &[Materials]),
    ("metal", &[Materials]),
    ("mining", &[Materials]),
    ("steel", &[Materials]),
    ("paper", &[Materials]),
    ("forest", &[Materials]),
    ("packag", &[Materials]),
    ("building", &[Materials, Industrials]),
    ("construction", &[Materials, Industrials]),
    // Industrials
    ("aerospace", &[Industrials]),
    ("defense", &[Industrials]),
    ("air", &[Industrials]),
    ("transport", &[Industrials]),
    ("truck", &[Industrials, ConsumerDiscretionary]),
    ("railroad", &[Industrials]),
    ("machinery", &[Industrials]),
    ("electrical", &[Industrials]),
    ("engineering", &[Industrials]),
    ("environmental", &[Industrials]),
    ("waste", &[Industrials]),
    ("shipbuilding", &[Industrials]),
    ("marine", &[Industrials]),
    ("office", &[Industrials, InformationTechnology]),
    // Consumer discretionary
    ("auto", &[ConsumerDiscretionary]),
    ("apparel", &[ConsumerDiscretionary]),
    ("retail", &[ConsumerDiscretionary, ConsumerStaples]),
    ("restaurant", &[ConsumerDiscretionary]),
    ("dining", &[ConsumerDiscretionary]),
    ("hotel", &[ConsumerDiscretionary]),
    ("gaming", &[ConsumerDiscretionary]),
    ("homebuild", &[ConsumerDiscretionary]),
    ("furn", &[ConsumerDiscretionary]),
    ("recreation", &[ConsumerDiscretionary]),
    ("shoe", &[ConsumerDiscretionary]),
    ("education", &[ConsumerDiscretionary]),
    ("rubber", &[ConsumerDiscretionary]),
    ("tires", &[ConsumerDiscretionary]),
    // Consumer staples
    ("food", &[ConsumerStaples]),
    ("beverage", &[ConsumerStaples]),
    ("tobacco", &[ConsumerStaples]),
    ("farming", &[ConsumerStaples]),
    ("agricultur", &[ConsumerStaples]),
    ("grocery", &[ConsumerStaples]),
    ("household", &[ConsumerStaples]),
];

/// Provider industry needle → sectors its companies are classified under.
///
/// An empty list marks industries that cut across every sector.
pub const INDUSTRY_SECTORS: &[(&str, &[Sector])] = &[
    ("advertising agencies", &[CommunicationServices]),
    ("aerospace & defense", &[Industrials]),
    ("agricultural inputs", &[Materials]),
    ("airlines", &[Industrials]),
    ("airports & air services", &[Industrials]),
    ("aluminum", &[Materials]),
    ("apparel manufacturing", &[ConsumerDiscretionary]),
    ("apparel retail", &[ConsumerDiscretionary]),
    ("asset management", &[Financials]),
    ("auto & truck dealerships", &[ConsumerDiscretionary]),
    ("auto manufacturers", &[ConsumerDiscretionary]),
    ("auto parts", &[ConsumerDiscretionary]),
    ("banks - diversified", &[Financials]),
    ("banks - regional", &[Financials]),
    ("beverages - brewers", &[ConsumerStaples]),
    ("beverages - non-alcoholic", &[ConsumerStaples]),
    ("beverages - wineries & distilleries", &[ConsumerStaples]),
    ("biotechnology", &[HealthCare]),
    ("broadcasting", &[CommunicationServices]),
    ("building materials", &[Materials]),
    ("building products & equipment", &[Industrials]),
    ("business equipment & supplies", &[Industrials]),
    ("capital markets", &[Financials]),
    ("chemicals", &[Materials]),
    ("coking coal", &[Materials, Energy]),
    ("communication equipment", &[InformationTechnology]),
    ("computer hardware", &[InformationTechnology]),
    ("confectioners", &[ConsumerStaples]),
    ("conglomerates", &[]),
    ("consulting services", &[Industrials]),
    ("consumer electronics", &[InformationTechnology, ConsumerDiscretionary]),
    ("copper", &[Materials]),
    ("credit services", &[Financials]),
    ("department stores", &[ConsumerDiscretionary]),
    ("discount stores", &[ConsumerStaples]),
    ("drug manufacturers", &[HealthCare]),
    ("education & training services", &[ConsumerDiscretionary]),
    ("electrical equipment & parts", &[Industrials]),
    ("electronic components", &[InformationTechnology]),
    ("electronic gaming & multimedia", &[CommunicationServices]),
    ("electronics & computer distribution", &[InformationTechnology]),
    ("engineering & construction", &[Industrials]),
    ("entertainment", &[CommunicationServices]),
    ("farm & heavy construction machinery", &[Industrials]),
    ("farm products", &[ConsumerStaples]),
    ("financial conglomerates", &[Financials]),
    ("financial data & stock exchanges", &[Financials]),
    ("food distribution", &[ConsumerStaples]),
    ("footwear & accessories", &[ConsumerDiscretionary]),
    ("furnishings, fixtures & appliances", &[ConsumerDiscretionary]),
    ("gambling", &[ConsumerDiscretionary]),
    ("gold", &[Materials]),
    ("grocery stores", &[ConsumerStaples]),
    ("health information services", &[HealthCare]),
    ("healthcare plans", &[HealthCare]),
    ("home improvement retail", &[ConsumerDiscretionary]),
    ("household & personal products", &[ConsumerStaples]),
    ("industrial distribution", &[Industrials]),
    ("industrial metals & mining", &[Materials]),
    ("information technology services", &[InformationTechnology]),
    ("infrastructure operations", &[Industrials]),
    ("insurance - diversified", &[Financials]),
    ("insurance - life", &[Financials]),
    ("insurance - property & casualty", &[Financials]),
    ("insurance - reinsurance", &[Financials]),
    ("integrated freight & logistics", &[Industrials]),
    ("internet content & information", &[CommunicationServices]),
    ("internet retail", &[ConsumerDiscretionary]),
    ("leisure", &[ConsumerDiscretionary]),
    ("lodging", &[ConsumerDiscretionary]),
    ("lumber & wood production", &[Materials]),
    ("luxury goods", &[ConsumerDiscretionary]),
    ("marine shipping", &[Industrials]),
    ("medical care facilities", &[HealthCare]),
    ("medical devices", &[HealthCare]),
    ("medical distribution", &[HealthCare]),
    ("medical instruments & supplies", &[HealthCare]),
    ("mortgage finance", &[Financials]),
    ("oil & gas drilling", &[Energy]),
    ("oil & gas e&p", &[Energy]),
    ("oil & gas equipment & services", &[Energy]),
    ("oil & gas integrated", &[Energy]),
    ("oil & gas midstream", &[Energy]),
    ("other precious metals", &[Materials]),
    ("packaged foods", &[ConsumerStaples]),
    ("packaging & containers", &[Materials]),
    ("paper & paper products", &[Materials]),
    ("personal services", &[ConsumerDiscretionary]),
    ("pollution & treatment controls", &[Industrials]),
    ("publishing", &[CommunicationServices]),
    ("railroads", &[Industrials]),
    ("real estate - development", &[RealEstate]),
    ("real estate - diversified", &[RealEstate]),
    ("real estate services", &[RealEstate]),
    ("recreational vehicles", &[ConsumerDiscretionary]),
    ("reit", &[RealEstate]),
    ("reit - retail", &[RealEstate]),
    ("rental & leasing services", &[Industrials]),
    ("residential construction", &[ConsumerDiscretionary]),
    ("resorts & casinos", &[ConsumerDiscretionary]),
    ("restaurants", &[ConsumerDiscretionary]),
    ("rubber & plastics", &[Materials, ConsumerDiscretionary]),
    ("scientific & technical instruments", &[InformationTechnology]),
    ("semiconductor equipment & materials", &[InformationTechnology]),
    ("semiconductors", &[InformationTechnology]),
    ("silver", &[Materials]),
    ("software - application", &[InformationTechnology]),
    ("software - infrastructure", &[InformationTechnology]),
    ("solar", &[InformationTechnology, Utilities]),
    ("specialty business services", &[Industrials]),
    ("specialty chemicals", &[Materials]),
    ("specialty industrial machinery", &[Industrials]),
    ("specialty retail", &[ConsumerDiscretionary]),
    ("steel", &[Materials]),
    ("telecom services", &[CommunicationServices]),
    ("thermal coal", &[Energy]),
    ("tobacco", &[ConsumerStaples]),
    ("tools & accessories", &[Industrials]),
    ("trucking", &[Industrials]),
    ("utilities - diversified", &[Utilities]),
    ("utilities - independent power producers", &[Utilities]),
    ("utilities - regulated", &[Utilities]),
    ("utilities - regulated electric", &[Utilities]),
    ("utilities - regulated water", &[Utilities]),
    ("utilities - renewable", &[Utilities]),
];

/// Sectors of a provider industry needle, if the needle is known.
pub fn industry_sectors(needle: &str) -> Option<&'static [Sector]> {
    INDUSTRY_SECTORS
        .iter()
        .find(|(industry, _)| *industry == needle)
        .map(|(_, sectors)| *sectors)
}

/// Broad sectors an industry label plausibly belongs to.
///
/// Each label token is checked against a table of keyword prefixes, so
/// "Banks (Regional)" hits `bank` and "Insurance (Life)" hits `insur`.
/// Abbreviated labels whose tokens all vanish ("R.E.I.T.") are also tried
/// with their punctuation removed. Canonical labels add the sectors of
/// their provider industries; if any of those spans every sector, nothing
/// is inferred.
///
/// ```
/// use comps::matching::infer_sectors;
/// use comps::Sector;
///
/// assert!(infer_sectors("Banks (Regional)").contains(&Sector::Financials));
/// assert!(infer_sectors("Diversified").is_empty());
/// ```
pub fn infer_sectors(label: &str) -> BTreeSet<Sector> {
    let mut sectors = hinted_sectors(label);
    for needle in canonical_needles(label).unwrap_or_default() {
        match industry_sectors(needle) {
            Some(found) if !found.is_empty() => sectors.extend(found.iter().copied()),
            _ => return BTreeSet::new(),
        }
    }
    sectors
}

fn hinted_sectors(label: &str) -> BTreeSet<Sector> {
    let mut tokens = tokenize(label);
    let compact: String = label
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    if !compact.is_empty() && !tokens.contains(&compact) {
        tokens.push(compact);
    }

    tokens
        .iter()
        .flat_map(|token| {
            SECTOR_HINTS
                .iter()
                .filter(move |(prefix, _)| token.starts_with(prefix))
                .flat_map(|(_, sectors)| sectors.iter().copied())
        })
        .collect()
}
