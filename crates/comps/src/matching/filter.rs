//! Two-stage company filter.
//!
//! Stage one ([`prefilter`]) runs on the static universe before any quote is
//! requested and only narrows by broad sector. Stage two ([`refine`]) runs on
//! fetched quotes and decides membership from the provider's industry text.

use crate::matching::sector_hint::infer_sectors;
use crate::matching::synonyms::KeywordSet;
use crate::universe::{Company, CompanyUniverse, Sector};
use comps_data::QuoteSnapshot;
use std::collections::BTreeSet;
use tracing::debug;

/// Candidate companies for a label, narrowed by inferred sector.
///
/// Falls back to the whole universe when no sector can be inferred.
pub fn prefilter<'a>(universe: &'a CompanyUniverse, label: &str) -> Vec<&'a Company> {
    prefilter_sectors(universe, &infer_sectors(label))
}

/// Candidates whose sector is in `sectors`.
///
/// An empty set keeps everything. Companies whose sector label could not be
/// parsed are always kept.
pub fn prefilter_sectors<'a>(
    universe: &'a CompanyUniverse,
    sectors: &BTreeSet<Sector>,
) -> Vec<&'a Company> {
    if sectors.is_empty() {
        return universe.companies().iter().collect();
    }

    let candidates: Vec<&Company> = universe
        .companies()
        .iter()
        .filter(|c| c.sector.is_none_or(|s| sectors.contains(&s)))
        .collect();
    debug!(
        universe = universe.len(),
        candidates = candidates.len(),
        ?sectors,
        "sector prefilter"
    );
    candidates
}

/// Quotes whose provider industry matches any keyword.
///
/// Quotes without an industry never match.
pub fn refine<'a, I>(records: I, keywords: &KeywordSet) -> Vec<&'a QuoteSnapshot>
where
    I: IntoIterator<Item = &'a QuoteSnapshot>,
{
    records
        .into_iter()
        .filter(|r| r.industry.as_deref().is_some_and(|i| keywords.matches(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::sector_hint::industry_sectors;
    use crate::matching::synonyms::{LABEL_NEEDLES, expand};

    fn universe() -> CompanyUniverse {
        CompanyUniverse::new([
            Company::new("JPMorgan", "JPM", "financials"),
            Company::new("Cisco", "CSCO", "information technology"),
            Company::new("Verizon", "VZ", "communication services"),
            Company::new("Mystery Corp", "MYST", "conglomerates"),
        ])
    }

    fn quote(symbol: &str, industry: Option<&str>) -> QuoteSnapshot {
        QuoteSnapshot {
            industry: industry.map(str::to_string),
            ..QuoteSnapshot::empty(symbol)
        }
    }

    fn tickers(companies: &[&Company]) -> Vec<String> {
        companies.iter().map(|c| c.ticker.clone()).collect()
    }

    #[test]
    fn test_prefilter_narrows_by_sector() {
        let universe = universe();
        let candidates = prefilter(&universe, "Banks (Regional)");
        assert_eq!(tickers(&candidates), vec!["JPM", "MYST"]);
    }

    #[test]
    fn test_prefilter_keeps_everything_without_hint() {
        let universe = universe();
        assert_eq!(prefilter(&universe, "Diversified").len(), universe.len());
    }

    #[test]
    fn test_prefilter_multi_sector() {
        let universe = universe();
        let candidates = prefilter(&universe, "Telecom. Equipment");
        assert_eq!(tickers(&candidates), vec!["CSCO", "VZ", "MYST"]);
    }

    #[test]
    fn test_canonical_labels_keep_their_target_sectors() {
        let universe = CompanyUniverse::new(
            Sector::all().map(|s| Company::new(s.name(), format!("S{}", s.code()), s.name())),
        );
        for (label, needles) in LABEL_NEEDLES {
            let kept = tickers(&prefilter(&universe, label));
            for needle in *needles {
                let sectors = industry_sectors(needle).unwrap_or_default();
                if sectors.is_empty() {
                    assert_eq!(kept.len(), universe.len(), "{label}");
                }
                for sector in sectors {
                    let ticker = format!("S{}", sector.code());
                    assert!(kept.contains(&ticker), "{label}: {needle} needs {sector}");
                }
            }
        }
    }

    #[test]
    fn test_refine() {
        let records = vec![
            quote("CSCO", Some("Communication Equipment")),
            quote("VZ", Some("Telecom Services")),
            quote("NOK", Some("communication equipment")),
            quote("DEAD", None),
        ];
        let keywords = expand("Telecom. Equipment");

        let matched: Vec<&str> = refine(&records, &keywords)
            .iter()
            .map(|r| r.symbol.as_str())
            .collect();
        assert_eq!(matched, vec!["CSCO", "NOK"]);
    }

    #[test]
    fn test_refine_no_match_is_empty() {
        let records = vec![quote("VZ", Some("Telecom Services"))];
        assert!(refine(&records, &expand("Semiconductor")).is_empty());
    }
}
