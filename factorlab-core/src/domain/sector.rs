use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed sector classification used for synthetic draws and concentration checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    Technology,
    Healthcare,
    Financials,
    Energy,
    Industrials,
    #[serde(rename = "Consumer Discretionary")]
    ConsumerDiscretionary,
    #[serde(rename = "Consumer Staples")]
    ConsumerStaples,
    Utilities,
    Materials,
    #[serde(rename = "Real Estate")]
    RealEstate,
    #[serde(rename = "Communication Services")]
    CommunicationServices,
}

impl Sector {
    /// All sectors in draw order. A synthetic sector draw indexes into this slice,
    /// so reordering it changes every seeded universe.
    pub const ALL: [Sector; 11] = [
        Sector::Technology,
        Sector::Healthcare,
        Sector::Financials,
        Sector::Energy,
        Sector::Industrials,
        Sector::ConsumerDiscretionary,
        Sector::ConsumerStaples,
        Sector::Utilities,
        Sector::Materials,
        Sector::RealEstate,
        Sector::CommunicationServices,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Sector::Technology => "Technology",
            Sector::Healthcare => "Healthcare",
            Sector::Financials => "Financials",
            Sector::Energy => "Energy",
            Sector::Industrials => "Industrials",
            Sector::ConsumerDiscretionary => "Consumer Discretionary",
            Sector::ConsumerStaples => "Consumer Staples",
            Sector::Utilities => "Utilities",
            Sector::Materials => "Materials",
            Sector::RealEstate => "Real Estate",
            Sector::CommunicationServices => "Communication Services",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sectors_are_distinct() {
        let mut sorted = Sector::ALL.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), Sector::ALL.len());
    }

    #[test]
    fn serializes_with_display_name() {
        let json = serde_json::to_string(&Sector::RealEstate).unwrap();
        assert_eq!(json, "\"Real Estate\"");
        let back: Sector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Sector::RealEstate);
        assert_eq!(Sector::RealEstate.to_string(), "Real Estate");
    }
}
