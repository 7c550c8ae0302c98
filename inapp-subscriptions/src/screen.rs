//! Destination screen selection.

use crate::classifier::SubscriptionState;
use inapp_lib::Tier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Screen the UI shows for a subscription state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationScreen {
    /// Subscription options; shown when no single profile applies.
    Catalog,
    BasicPrepaidProfile,
    BasicRenewableProfile,
    PremiumPrepaidProfile,
    PremiumRenewableProfile,
}

impl DestinationScreen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::BasicPrepaidProfile => "basic-prepaid-profile",
            Self::BasicRenewableProfile => "basic-renewable-profile",
            Self::PremiumPrepaidProfile => "premium-prepaid-profile",
            Self::PremiumRenewableProfile => "premium-renewable-profile",
        }
    }

    /// Tier of the profile, `None` for the catalog.
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Self::Catalog => None,
            Self::BasicPrepaidProfile | Self::BasicRenewableProfile => Some(Tier::Basic),
            Self::PremiumPrepaidProfile | Self::PremiumRenewableProfile => Some(Tier::Premium),
        }
    }

    pub fn is_profile(&self) -> bool {
        !matches!(self, Self::Catalog)
    }
}

impl fmt::Display for DestinationScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SubscriptionState> for DestinationScreen {
    fn from(state: SubscriptionState) -> Self {
        select_screen(&state)
    }
}

/// Pick the destination screen for `state`.
///
/// Rules are evaluated in order and the first match wins:
///
/// 1. renewable basic without renewable premium
/// 2. renewable premium without renewable basic
/// 3. prepaid basic without prepaid premium
/// 4. prepaid premium without prepaid basic
/// 5. catalog
///
/// Holding both tiers of the same kind matches neither rule of that pair.
/// Holding prepaid and renewable of one tier resolves to the renewable
/// profile via rule 1 or 2.
pub fn select_screen(state: &SubscriptionState) -> DestinationScreen {
    if state.renewable_basic && !state.renewable_premium {
        DestinationScreen::BasicRenewableProfile
    } else if state.renewable_premium && !state.renewable_basic {
        DestinationScreen::PremiumRenewableProfile
    } else if state.prepaid_basic && !state.prepaid_premium {
        DestinationScreen::BasicPrepaidProfile
    } else if state.prepaid_premium && !state.prepaid_basic {
        DestinationScreen::PremiumPrepaidProfile
    } else {
        DestinationScreen::Catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(rb: bool, pb: bool, rp: bool, pp: bool) -> SubscriptionState {
        SubscriptionState {
            renewable_basic: rb,
            prepaid_basic: pb,
            renewable_premium: rp,
            prepaid_premium: pp,
        }
    }

    #[test]
    fn test_single_flags() {
        assert_eq!(
            select_screen(&state(true, false, false, false)),
            DestinationScreen::BasicRenewableProfile
        );
        assert_eq!(
            select_screen(&state(false, true, false, false)),
            DestinationScreen::BasicPrepaidProfile
        );
        assert_eq!(
            select_screen(&state(false, false, true, false)),
            DestinationScreen::PremiumRenewableProfile
        );
        assert_eq!(
            select_screen(&state(false, false, false, true)),
            DestinationScreen::PremiumPrepaidProfile
        );
    }

    #[test]
    fn test_no_flags_is_catalog() {
        assert_eq!(
            select_screen(&SubscriptionState::default()),
            DestinationScreen::Catalog
        );
    }

    #[test]
    fn test_both_renewable_tiers_falls_through_to_catalog() {
        assert_eq!(
            select_screen(&state(true, false, true, false)),
            DestinationScreen::Catalog
        );
    }

    #[test]
    fn test_both_renewable_tiers_with_prepaid_basic() {
        // Rules 1 and 2 cancel out, rule 3 applies.
        assert_eq!(
            select_screen(&state(true, true, true, false)),
            DestinationScreen::BasicPrepaidProfile
        );
    }

    #[test]
    fn test_both_prepaid_tiers_falls_through_to_catalog() {
        assert_eq!(
            select_screen(&state(false, true, false, true)),
            DestinationScreen::Catalog
        );
    }

    #[test]
    fn test_renewable_rules_take_precedence() {
        assert_eq!(
            select_screen(&state(true, true, false, false)),
            DestinationScreen::BasicRenewableProfile
        );
        assert_eq!(
            select_screen(&state(false, true, true, false)),
            DestinationScreen::PremiumRenewableProfile
        );
    }

    #[test]
    fn test_all_flags_is_catalog() {
        assert_eq!(
            select_screen(&state(true, true, true, true)),
            DestinationScreen::Catalog
        );
    }

    #[test]
    fn test_from_state() {
        let screen: DestinationScreen = state(false, false, true, false).into();
        assert_eq!(screen.tier(), Some(Tier::Premium));
        assert!(screen.is_profile());
        assert_eq!(screen.to_string(), "premium-renewable-profile");
    }
}
