//! Purchase classification.
//!
//! Maps the current purchase set onto four independent subscription flags.
//! The flags are recomputed from scratch for every snapshot and never stored.

use inapp_lib::{CatalogConfig, ProductId, Purchase, Tier};
use serde::{Deserialize, Serialize};

/// Which kinds of subscription the user currently holds.
///
/// Flags are independent; exclusivity is resolved by the screen selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionState {
    pub renewable_basic: bool,
    pub prepaid_basic: bool,
    pub renewable_premium: bool,
    pub prepaid_premium: bool,
}

impl SubscriptionState {
    /// No subscription of any kind.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Renewable flag of `tier`.
    pub fn renewable(&self, tier: Tier) -> bool {
        match tier {
            Tier::Basic => self.renewable_basic,
            Tier::Premium => self.renewable_premium,
        }
    }

    /// Prepaid flag of `tier`.
    pub fn prepaid(&self, tier: Tier) -> bool {
        match tier {
            Tier::Basic => self.prepaid_basic,
            Tier::Premium => self.prepaid_premium,
        }
    }
}

/// Classifies purchases against the two base products of the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseClassifier {
    basic_product: ProductId,
    premium_product: ProductId,
}

impl PurchaseClassifier {
    pub fn new(basic_product: impl Into<ProductId>, premium_product: impl Into<ProductId>) -> Self {
        Self {
            basic_product: basic_product.into(),
            premium_product: premium_product.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            config.basic_product_id.clone(),
            config.premium_product_id.clone(),
        )
    }

    /// Derive the subscription flags of `purchases`.
    ///
    /// A flag is set iff some purchase covers the tier's base product and its
    /// auto-renewing flag matches the flag's polarity. Purchase state and
    /// acknowledgement are not consulted.
    pub fn classify(&self, purchases: &[Purchase]) -> SubscriptionState {
        let holds = |product: &ProductId, auto_renewing: bool| {
            purchases
                .iter()
                .any(|p| p.covers(product) && p.is_auto_renewing == auto_renewing)
        };

        SubscriptionState {
            renewable_basic: holds(&self.basic_product, true),
            prepaid_basic: holds(&self.basic_product, false),
            renewable_premium: holds(&self.premium_product, true),
            prepaid_premium: holds(&self.premium_product, false),
        }
    }
}
