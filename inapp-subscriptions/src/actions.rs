//! Purchase actions offered on each destination screen.

use crate::screen::DestinationScreen;
use inapp_lib::{PlanTag, Tier};
use serde::{Deserialize, Serialize};

/// Whether the intent resolver sees the user's current purchases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingsPolicy {
    /// Resolve as a new purchase without looking at holdings.
    Ignore,
    /// Replace the current purchase.
    ReplaceCurrent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// First purchase from the catalog.
    Subscribe,
    /// Extend a prepaid plan.
    TopUp,
    /// Prepaid to renewable within a tier.
    Convert,
    Upgrade,
    Downgrade,
}

/// A buy button: which plan to buy and how to treat current holdings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanAction {
    pub kind: ActionKind,
    pub tag: PlanTag,
    pub holdings: HoldingsPolicy,
}

impl PlanAction {
    fn new(kind: ActionKind, tag: PlanTag) -> Self {
        let holdings = match kind {
            ActionKind::Subscribe | ActionKind::TopUp => HoldingsPolicy::Ignore,
            ActionKind::Convert | ActionKind::Upgrade | ActionKind::Downgrade => {
                HoldingsPolicy::ReplaceCurrent
            }
        };
        Self {
            kind,
            tag,
            holdings,
        }
    }

    /// Tier of the product this action buys.
    pub fn tier(&self) -> Tier {
        self.tag.tier()
    }
}

/// Actions available on `screen`, in display order.
pub fn available_actions(screen: DestinationScreen) -> Vec<PlanAction> {
    use ActionKind::*;
    use PlanTag::*;

    match screen {
        DestinationScreen::Catalog => PlanTag::all()
            .iter()
            .map(|tag| PlanAction::new(Subscribe, *tag))
            .collect(),
        DestinationScreen::BasicPrepaidProfile => vec![
            PlanAction::new(TopUp, PrepaidBasic),
            PlanAction::new(Convert, MonthlyBasic),
            PlanAction::new(Convert, YearlyBasic),
        ],
        DestinationScreen::BasicRenewableProfile => vec![
            PlanAction::new(Upgrade, MonthlyPremium),
            PlanAction::new(Upgrade, YearlyPremium),
            PlanAction::new(Upgrade, PrepaidPremium),
        ],
        DestinationScreen::PremiumPrepaidProfile => vec![
            PlanAction::new(TopUp, PrepaidPremium),
            PlanAction::new(Convert, MonthlyPremium),
            PlanAction::new(Convert, YearlyPremium),
        ],
        DestinationScreen::PremiumRenewableProfile => vec![
            PlanAction::new(Downgrade, MonthlyBasic),
            PlanAction::new(Downgrade, YearlyBasic),
            PlanAction::new(Downgrade, PrepaidBasic),
        ],
    }
}
