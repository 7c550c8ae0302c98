//! Outbound purchase-flow requests.

use crate::{OfferToken, ProductId, PurchaseToken};
use serde::{Deserialize, Serialize};

/// Billing adjustment applied when one purchase replaces another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProrationMode {
    /// Credit the remaining time of the old plan toward the new one.
    ImmediateWithTimeProration,
    /// Charge the prorated price difference now, keep the renewal date.
    ImmediateAndChargeProratedPrice,
    /// Switch now, start charging at the next renewal.
    ImmediateWithoutProration,
    /// Switch at the next renewal.
    Deferred,
    /// Switch now and charge the full price of the new plan.
    #[default]
    ImmediateAndChargeFullPrice,
}

/// A request handed to the purchasing collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PurchaseRequest {
    /// First-time purchase or prepaid top-up.
    New {
        product_id: ProductId,
        offer_token: OfferToken,
    },
    /// Upgrade, downgrade or conversion replacing an existing purchase.
    Change {
        product_id: ProductId,
        offer_token: OfferToken,
        old_purchase_token: PurchaseToken,
        proration_mode: ProrationMode,
    },
}

impl PurchaseRequest {
    pub fn product_id(&self) -> &ProductId {
        match self {
            Self::New { product_id, .. } | Self::Change { product_id, .. } => product_id,
        }
    }

    pub fn offer_token(&self) -> &OfferToken {
        match self {
            Self::New { offer_token, .. } | Self::Change { offer_token, .. } => offer_token,
        }
    }

    /// Token of the purchase being replaced, for change requests.
    pub fn old_purchase_token(&self) -> Option<&PurchaseToken> {
        match self {
            Self::New { .. } => None,
            Self::Change {
                old_purchase_token, ..
            } => Some(old_purchase_token),
        }
    }

    pub fn is_change(&self) -> bool {
        matches!(self, Self::Change { .. })
    }
}
