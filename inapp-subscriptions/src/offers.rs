//! Offer Selection
//!
//! Picks the offer to purchase for a plan tag:
//!
//! 1. keep offers whose tags contain the plan tag (case-insensitive)
//! 2. scan every pricing phase of every eligible offer, in order, and keep
//!    the offer owning the cheapest phase
//!
//! Phases are compared, not offers: an offer with a cheap introductory phase
//! wins over one whose only phase is cheaper than the intro offer's regular
//! price. When several phases share the minimum price the one scanned last
//! wins.

use crate::{Result, SubscriptionError};
use inapp_lib::{CatalogConfig, Offer, PlanTag, Product};

/// The chosen offer and the phase that made it cheapest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OfferSelection<'a> {
    pub offer: &'a Offer,
    /// Index into `offer.pricing_phases` of the cheapest phase.
    pub phase_index: usize,
    pub price_amount_micros: u64,
}

/// Offers carrying `tag`, in their original order.
pub fn eligible_offers<'a>(offers: &'a [Offer], tag: &str) -> Vec<&'a Offer> {
    offers.iter().filter(|offer| offer.has_tag(tag)).collect()
}

/// Offer owning the cheapest pricing phase among `eligible`.
///
/// Returns `None` when no eligible offer has any pricing phase.
pub fn least_priced_offer<'a>(eligible: &[&'a Offer]) -> Option<OfferSelection<'a>> {
    let mut best: Option<OfferSelection<'a>> = None;

    for &offer in eligible {
        for (phase_index, phase) in offer.pricing_phases.iter().enumerate() {
            let price = phase.price_amount_micros;
            // `<=` so that the last phase at the minimum price wins.
            if best.map_or(true, |b| price <= b.price_amount_micros) {
                best = Some(OfferSelection {
                    offer,
                    phase_index,
                    price_amount_micros: price,
                });
            }
        }
    }

    best
}

/// Filter `offers` by `tag` and pick the cheapest.
pub fn select_offer<'a>(offers: &'a [Offer], tag: &str) -> Option<OfferSelection<'a>> {
    least_priced_offer(&eligible_offers(offers, tag))
}

/// Offer selection against a configured catalog.
#[derive(Clone, Debug)]
pub struct OfferSelector<'c> {
    config: &'c CatalogConfig,
}

impl<'c> OfferSelector<'c> {
    pub fn new(config: &'c CatalogConfig) -> Self {
        Self { config }
    }

    /// Cheapest offer of `product` for `tag`, using the configured store tag.
    pub fn select<'a>(&self, product: &'a Product, tag: PlanTag) -> Result<OfferSelection<'a>> {
        let store_tag = self.config.offer_tag(tag);
        select_offer(&product.offers, store_tag).ok_or_else(|| {
            tracing::debug!(
                product = %product.product_id,
                tag = store_tag,
                "no eligible offer"
            );
            SubscriptionError::OfferNotFound {
                product_id: product.product_id.clone(),
                tag: store_tag.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inapp_lib::test_utils::{offer, TestFixtures};
    use inapp_lib::PricingPhase;

    fn tagged(token: &str, tag: &str, prices: &[u64]) -> Offer {
        prices.iter().fold(Offer::new(token).with_tag(tag), |o, p| {
            o.with_phase(PricingPhase::recurring(*p, "P1M"))
        })
    }

    #[test]
    fn test_picks_cheapest_offer() {
        let offers = vec![
            tagged("a", "monthly-basic", &[1000]),
            tagged("b", "monthly-basic", &[500]),
        ];
        let selection = select_offer(&offers, "monthly-basic").unwrap();
        assert_eq!(selection.offer.offer_token.as_str(), "b");
        assert_eq!(selection.price_amount_micros, 500);
    }

    #[test]
    fn test_missing_tag_is_none() {
        let offers = vec![tagged("a", "monthly-basic", &[1000])];
        assert!(select_offer(&offers, "yearly-basic").is_none());
        assert!(select_offer(&[], "yearly-basic").is_none());
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let offers = vec![tagged("a", "Monthly-Basic", &[1000])];
        assert!(select_offer(&offers, "MONTHLY-BASIC").is_some());
    }

    #[test]
    fn test_ineligible_cheaper_offer_ignored() {
        let offers = vec![
            tagged("cheap", "yearly-basic", &[1]),
            tagged("tagged", "monthly-basic", &[1000]),
        ];
        let selection = select_offer(&offers, "monthly-basic").unwrap();
        assert_eq!(selection.offer.offer_token.as_str(), "tagged");
    }

    #[test]
    fn test_later_phase_can_win() {
        // Intro offer: 3000 then 200; plain offer: 1000.
        let offers = vec![
            tagged("plain", "monthly-basic", &[1000]),
            tagged("intro", "monthly-basic", &[3000, 200]),
        ];
        let selection = select_offer(&offers, "monthly-basic").unwrap();
        assert_eq!(selection.offer.offer_token.as_str(), "intro");
        assert_eq!(selection.phase_index, 1);
        assert_eq!(selection.price_amount_micros, 200);
    }

    #[test]
    fn test_tie_resolves_to_last_scanned() {
        let offers = vec![
            tagged("first", "monthly-basic", &[500]),
            tagged("second", "monthly-basic", &[700, 500]),
            tagged("third", "monthly-basic", &[900]),
        ];
        let selection = select_offer(&offers, "monthly-basic").unwrap();
        assert_eq!(selection.offer.offer_token.as_str(), "second");
        assert_eq!(selection.phase_index, 1);
    }

    #[test]
    fn test_tie_within_one_offer_keeps_last_phase() {
        let offers = vec![tagged("only", "monthly-basic", &[500, 500])];
        let selection = select_offer(&offers, "monthly-basic").unwrap();
        assert_eq!(selection.phase_index, 1);
    }

    #[test]
    fn test_free_phase_selected() {
        let offers = vec![
            tagged("paid", "monthly-basic", &[990_000]),
            tagged("trial", "monthly-basic", &[0, 990_000]),
        ];
        let selection = select_offer(&offers, "monthly-basic").unwrap();
        assert_eq!(selection.offer.offer_token.as_str(), "trial");
        assert_eq!(selection.price_amount_micros, 0);
    }

    #[test]
    fn test_offer_without_phases_never_selected() {
        let offers = vec![Offer::new("empty").with_tag("monthly-basic")];
        assert_eq!(eligible_offers(&offers, "monthly-basic").len(), 1);
        assert!(select_offer(&offers, "monthly-basic").is_none());
    }

    #[test]
    fn test_selector_uses_configured_tag() {
        let config = TestFixtures::config().with_offer_tag(PlanTag::PrepaidBasic, "prepaidbasic");
        let product = inapp_lib::Product::new(TestFixtures::BASIC)
            .with_offer(tagged("store", "PrepaidBasic", &[3_490_000]));

        let selection = OfferSelector::new(&config)
            .select(&product, PlanTag::PrepaidBasic)
            .unwrap();
        assert_eq!(selection.offer.offer_token.as_str(), "store");
    }

    #[test]
    fn test_selector_not_found() {
        let config = TestFixtures::config();
        let product = TestFixtures::basic_product();

        let err = OfferSelector::new(&config)
            .select(&product, PlanTag::MonthlyPremium)
            .unwrap_err();
        assert!(matches!(
            err,
            SubscriptionError::OfferNotFound { ref tag, .. } if tag == "monthly-premium"
        ));
    }

    #[test]
    fn test_fixture_intro_pricing() {
        let product = inapp_lib::Product::new(TestFixtures::BASIC)
            .with_offer(offer("a", PlanTag::MonthlyBasic, &[990_000, 2_990_000]))
            .with_offer(offer("b", PlanTag::MonthlyBasic, &[1_990_000]));
        let selection = select_offer(&product.offers, "monthly-basic").unwrap();
        assert_eq!(selection.offer.offer_token.as_str(), "a");
        assert_eq!(selection.phase_index, 0);
    }
}
