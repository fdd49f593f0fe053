//! Broad sector taxonomy (GICS level 1).
//!
//! Company universes label sectors with free text from more than one
//! vendor ("information technology", "Technology", "Consumer Cyclical"...).
//! [`Sector::parse_label`] folds those spellings onto the eleven GICS sectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GICS Level 1 sectors (11 sectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    /// Energy
    Energy,

    /// Materials
    Materials,

    /// Industrials
    Industrials,

    /// Consumer Discretionary
    ConsumerDiscretionary,

    /// Consumer Staples
    ConsumerStaples,

    /// Health Care
    HealthCare,

    /// Financials
    Financials,

    /// Information Technology
    InformationTechnology,

    /// Communication Services
    CommunicationServices,

    /// Utilities
    Utilities,

    /// Real Estate
    RealEstate,
}

impl Sector {
    /// Returns all sectors in GICS code order.
    pub const fn all() -> [Self; 11] {
        [
            Self::Energy,
            Self::Materials,
            Self::Industrials,
            Self::ConsumerDiscretionary,
            Self::ConsumerStaples,
            Self::HealthCare,
            Self::Financials,
            Self::InformationTechnology,
            Self::CommunicationServices,
            Self::Utilities,
            Self::RealEstate,
        ]
    }

    /// Returns the sector code (2-digit).
    pub const fn code(&self) -> u8 {
        match self {
            Self::Energy => 10,
            Self::Materials => 15,
            Self::Industrials => 20,
            Self::ConsumerDiscretionary => 25,
            Self::ConsumerStaples => 30,
            Self::HealthCare => 35,
            Self::Financials => 40,
            Self::InformationTechnology => 45,
            Self::CommunicationServices => 50,
            Self::Utilities => 55,
            Self::RealEstate => 60,
        }
    }

    /// Returns the full sector name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InformationTechnology => "Information Technology",
            Self::HealthCare => "Health Care",
            Self::Financials => "Financials",
            Self::ConsumerDiscretionary => "Consumer Discretionary",
            Self::CommunicationServices => "Communication Services",
            Self::Industrials => "Industrials",
            Self::ConsumerStaples => "Consumer Staples",
            Self::Energy => "Energy",
            Self::Utilities => "Utilities",
            Self::RealEstate => "Real Estate",
            Self::Materials => "Materials",
        }
    }

    /// Map a free-text sector label onto a sector.
    ///
    /// Accepts GICS names, Yahoo/Morningstar names and common short forms,
    /// ignoring case, spacing and punctuation. Returns `None` for labels
    /// that do not name a single sector.
    pub fn parse_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        let sector = match normalized.as_str() {
            "informationtechnology" | "technology" | "it" | "tech" => Self::InformationTechnology,
            "healthcare" | "health" => Self::HealthCare,
            "financials" | "financial" | "finance" | "financialservices" => Self::Financials,
            "consumerdiscretionary" | "discretionary" | "consumercyclical" => {
                Self::ConsumerDiscretionary
            }
            "communicationservices" | "communication" | "communications" | "comms"
            | "telecommunicationservices" => Self::CommunicationServices,
            "industrials" | "industrial" => Self::Industrials,
            "consumerstaples" | "staples" | "consumerdefensive" => Self::ConsumerStaples,
            "energy" => Self::Energy,
            "utilities" | "utility" => Self::Utilities,
            "realestate" | "estate" => Self::RealEstate,
            "materials" | "basicmaterials" => Self::Materials,
            _ => return None,
        };

        Some(sector)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Sector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s).ok_or_else(|| format!("Unknown sector: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_all_sectors() {
        let sectors = Sector::all();
        assert_eq!(sectors.len(), 11);
        assert!(sectors.windows(2).all(|w| w[0].code() < w[1].code()));
    }

    #[test]
    fn test_sector_codes() {
        assert_eq!(Sector::Energy.code(), 10);
        assert_eq!(Sector::InformationTechnology.code(), 45);
        assert_eq!(Sector::RealEstate.code(), 60);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", Sector::InformationTechnology),
            "Information Technology"
        );
        assert_eq!(format!("{}", Sector::Energy), "Energy");
    }

    #[rstest]
    #[case("information technology", Some(Sector::InformationTechnology))]
    #[case("Technology", Some(Sector::InformationTechnology))]
    #[case("Health Care", Some(Sector::HealthCare))]
    #[case("healthcare", Some(Sector::HealthCare))]
    #[case("Financial Services", Some(Sector::Financials))]
    #[case("Consumer Cyclical", Some(Sector::ConsumerDiscretionary))]
    #[case("consumer defensive", Some(Sector::ConsumerStaples))]
    #[case("Basic Materials", Some(Sector::Materials))]
    #[case("real-estate", Some(Sector::RealEstate))]
    #[case("Conglomerates", None)]
    #[case("", None)]
    fn test_parse_label(#[case] label: &str, #[case] expected: Option<Sector>) {
        assert_eq!(Sector::parse_label(label), expected);
    }

    #[test]
    fn test_from_str_error() {
        assert!("widgets".parse::<Sector>().is_err());
        assert_eq!("energy".parse::<Sector>(), Ok(Sector::Energy));
    }
}
