//! Test fixtures and data generators.

use crate::{CatalogConfig, Offer, PlanTag, PricingPhase, Product, Purchase};

/// Collection of commonly used test fixtures.
pub struct TestFixtures;

impl TestFixtures {
    /// Product id of the basic tier in [`TestFixtures::config`].
    pub const BASIC: &'static str = "basic_subscription";

    /// Product id of the premium tier in [`TestFixtures::config`].
    pub const PREMIUM: &'static str = "premium_subscription";

    /// Catalog configuration using the canonical plan tag keys.
    pub fn config() -> CatalogConfig {
        CatalogConfig::new(Self::BASIC, Self::PREMIUM)
    }

    /// Basic product with one offer per basic plan tag.
    ///
    /// Offer tokens are `<tag>-offer`; monthly has an introductory phase.
    pub fn basic_product() -> Product {
        Product::new(Self::BASIC)
            .with_offer(
                offer("monthly-basic-offer", PlanTag::MonthlyBasic, &[990_000, 2_990_000])
                    .with_base_plan("monthly"),
            )
            .with_offer(
                offer("yearly-basic-offer", PlanTag::YearlyBasic, &[29_990_000])
                    .with_base_plan("yearly"),
            )
            .with_offer(
                offer("prepaid-basic-offer", PlanTag::PrepaidBasic, &[3_490_000])
                    .with_base_plan("prepaid"),
            )
    }

    /// Premium product with one offer per premium plan tag.
    pub fn premium_product() -> Product {
        Product::new(Self::PREMIUM)
            .with_offer(
                offer("monthly-premium-offer", PlanTag::MonthlyPremium, &[5_990_000])
                    .with_base_plan("monthly"),
            )
            .with_offer(
                offer("yearly-premium-offer", PlanTag::YearlyPremium, &[59_990_000])
                    .with_base_plan("yearly"),
            )
            .with_offer(
                offer("prepaid-premium-offer", PlanTag::PrepaidPremium, &[6_490_000])
                    .with_base_plan("prepaid"),
            )
    }

    /// Both products.
    pub fn catalog() -> Vec<Product> {
        vec![Self::basic_product(), Self::premium_product()]
    }
}

/// Offer tagged with `tag` whose phases charge `prices` micros in order.
pub fn offer(token: &str, tag: PlanTag, prices: &[u64]) -> Offer {
    prices.iter().fold(Offer::new(token).with_tag(tag.as_str()), |offer, price| {
        offer.with_phase(PricingPhase::recurring(*price, "P1M"))
    })
}

/// Acknowledged auto-renewing purchase of `product`.
pub fn renewing_purchase(token: &str, product: &str) -> Purchase {
    Purchase::new(token, product)
        .auto_renewing(true)
        .acknowledged(true)
}

/// Acknowledged prepaid (non-renewing) purchase of `product`.
pub fn prepaid_purchase(token: &str, product: &str) -> Purchase {
    Purchase::new(token, product)
        .auto_renewing(false)
        .acknowledged(true)
}
