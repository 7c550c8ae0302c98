//! Plan tags and subscription tiers.

use crate::{InAppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription tier backed by one base product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Premium,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing cadence / prepaid-ness of an offer.
///
/// Each variant has a canonical key (`monthly-basic`, `prepaid-premium`, ...)
/// that is matched case-insensitively against offer tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlanTag {
    #[serde(rename = "monthly-basic")]
    MonthlyBasic,
    #[serde(rename = "yearly-basic")]
    YearlyBasic,
    #[serde(rename = "prepaid-basic")]
    PrepaidBasic,
    #[serde(rename = "monthly-premium")]
    MonthlyPremium,
    #[serde(rename = "yearly-premium")]
    YearlyPremium,
    #[serde(rename = "prepaid-premium")]
    PrepaidPremium,
}

impl PlanTag {
    const ALL: [PlanTag; 6] = [
        PlanTag::MonthlyBasic,
        PlanTag::YearlyBasic,
        PlanTag::PrepaidBasic,
        PlanTag::MonthlyPremium,
        PlanTag::YearlyPremium,
        PlanTag::PrepaidPremium,
    ];

    /// Every plan tag, basic tier first.
    pub fn all() -> &'static [PlanTag] {
        &Self::ALL
    }

    /// Canonical key of this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MonthlyBasic => "monthly-basic",
            Self::YearlyBasic => "yearly-basic",
            Self::PrepaidBasic => "prepaid-basic",
            Self::MonthlyPremium => "monthly-premium",
            Self::YearlyPremium => "yearly-premium",
            Self::PrepaidPremium => "prepaid-premium",
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            Self::MonthlyBasic | Self::YearlyBasic | Self::PrepaidBasic => Tier::Basic,
            Self::MonthlyPremium | Self::YearlyPremium | Self::PrepaidPremium => Tier::Premium,
        }
    }

    /// Prepaid plans do not auto-renew.
    pub fn is_prepaid(&self) -> bool {
        matches!(self, Self::PrepaidBasic | Self::PrepaidPremium)
    }

    /// Plan tags belonging to `tier`, in canonical order.
    pub fn for_tier(tier: Tier) -> impl Iterator<Item = PlanTag> {
        Self::ALL.into_iter().filter(move |tag| tag.tier() == tier)
    }
}

impl fmt::Display for PlanTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTag {
    type Err = InAppError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| InAppError::invalid_data("plan tag", format!("unknown key '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "Monthly-Basic".parse::<PlanTag>().unwrap(),
            PlanTag::MonthlyBasic
        );
        assert_eq!(
            "PREPAID-PREMIUM".parse::<PlanTag>().unwrap(),
            PlanTag::PrepaidPremium
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("weekly-basic".parse::<PlanTag>().is_err());
        assert!("".parse::<PlanTag>().is_err());
    }

    #[test]
    fn test_tier_and_prepaid() {
        assert_eq!(PlanTag::YearlyPremium.tier(), Tier::Premium);
        assert_eq!(PlanTag::PrepaidBasic.tier(), Tier::Basic);
        assert!(PlanTag::PrepaidBasic.is_prepaid());
        assert!(!PlanTag::MonthlyPremium.is_prepaid());
    }

    #[test]
    fn test_for_tier() {
        let basic: Vec<_> = PlanTag::for_tier(Tier::Basic).collect();
        assert_eq!(
            basic,
            vec![
                PlanTag::MonthlyBasic,
                PlanTag::YearlyBasic,
                PlanTag::PrepaidBasic
            ]
        );
    }

    #[test]
    fn test_serde_uses_canonical_keys() {
        let json = serde_json::to_string(&PlanTag::YearlyBasic).unwrap();
        assert_eq!(json, "\"yearly-basic\"");
        let tag: PlanTag = serde_json::from_str("\"prepaid-premium\"").unwrap();
        assert_eq!(tag, PlanTag::PrepaidPremium);
    }
}
