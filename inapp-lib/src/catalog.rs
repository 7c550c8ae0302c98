//! Product catalog snapshot types.
//!
//! Products and their offers are supplied by the billing collaborator and are
//! never mutated by this crate.

use crate::{OfferToken, ProductId};
use serde::{Deserialize, Serialize};

/// How a pricing phase repeats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceMode {
    /// Repeats until the subscription is canceled.
    #[default]
    InfiniteRecurring,
    /// Repeats for `billing_cycle_count` cycles.
    FiniteRecurring,
    /// Charged once.
    NonRecurring,
}

/// One step of an offer's pricing schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPhase {
    /// Price in micro-units of `currency_code` (1_000_000 = 1 unit).
    pub price_amount_micros: u64,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: String,
    /// ISO 8601 billing period, e.g. `P1M`.
    #[serde(default)]
    pub billing_period: String,
    #[serde(default)]
    pub billing_cycle_count: u32,
    #[serde(default)]
    pub recurrence_mode: RecurrenceMode,
}

impl PricingPhase {
    /// Infinitely recurring phase at `price_amount_micros`.
    pub fn recurring(price_amount_micros: u64, billing_period: impl Into<String>) -> Self {
        Self {
            price_amount_micros,
            currency_code: String::new(),
            billing_period: billing_period.into(),
            billing_cycle_count: 0,
            recurrence_mode: RecurrenceMode::InfiniteRecurring,
        }
    }

    /// Price formatted as major units, e.g. `4.99 USD`.
    pub fn formatted_price(&self) -> String {
        let major = self.price_amount_micros / 1_000_000;
        let minor = (self.price_amount_micros % 1_000_000) / 10_000;
        if self.currency_code.is_empty() {
            format!("{}.{:02}", major, minor)
        } else {
            format!("{}.{:02} {}", major, minor, self.currency_code)
        }
    }
}

/// A purchasable pricing configuration of a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Opaque token handed back to the billing service when purchasing.
    pub offer_token: OfferToken,
    /// Base plan this offer belongs to.
    #[serde(default)]
    pub base_plan_id: String,
    /// Set for promotional offers layered on a base plan.
    #[serde(default)]
    pub offer_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ordered pricing schedule; the first phase is the first charge.
    #[serde(default)]
    pub pricing_phases: Vec<PricingPhase>,
}

impl Offer {
    pub fn new(offer_token: impl Into<OfferToken>) -> Self {
        Self {
            offer_token: offer_token.into(),
            base_plan_id: String::new(),
            offer_id: None,
            tags: Vec::new(),
            pricing_phases: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_phase(mut self, phase: PricingPhase) -> Self {
        self.pricing_phases.push(phase);
        self
    }

    pub fn with_base_plan(mut self, base_plan_id: impl Into<String>) -> Self {
        self.base_plan_id = base_plan_id.into();
        self
    }

    /// Case-insensitive exact match against this offer's tags.
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }

    /// First-charge phase, if the schedule is non-empty.
    pub fn first_phase(&self) -> Option<&PricingPhase> {
        self.pricing_phases.first()
    }
}

/// A product listed by the billing service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

impl Product {
    pub fn new(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: product_id.into(),
            name: String::new(),
            description: String::new(),
            offers: Vec::new(),
        }
    }

    pub fn with_offer(mut self, offer: Offer) -> Self {
        self.offers.push(offer);
        self
    }

    /// Look up an offer by its token.
    pub fn offer(&self, token: &OfferToken) -> Option<&Offer> {
        self.offers.iter().find(|o| &o.offer_token == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tag_ignores_case() {
        let offer = Offer::new("tok").with_tag("Monthly-Basic");
        assert!(offer.has_tag("monthly-basic"));
        assert!(offer.has_tag("MONTHLY-BASIC"));
        assert!(!offer.has_tag("monthly"));
    }

    #[test]
    fn test_formatted_price() {
        let mut phase = PricingPhase::recurring(4_990_000, "P1M");
        assert_eq!(phase.formatted_price(), "4.99");
        phase.currency_code = "USD".into();
        assert_eq!(phase.formatted_price(), "4.99 USD");
    }

    #[test]
    fn test_product_deserializes_with_defaults() {
        let json = r#"{
            "product_id": "basic_subscription",
            "offers": [
                { "offer_token": "t1", "tags": ["monthly-basic"],
                  "pricing_phases": [{ "price_amount_micros": 990000 }] }
            ]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_id.as_str(), "basic_subscription");
        assert_eq!(product.offers.len(), 1);
        let phase = product.offers[0].first_phase().unwrap();
        assert_eq!(phase.price_amount_micros, 990_000);
        assert_eq!(phase.recurrence_mode, RecurrenceMode::InfiniteRecurring);
        assert!(product.offer(&OfferToken::new("t1")).is_some());
    }
}
