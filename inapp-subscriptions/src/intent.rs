//! Purchase intent resolution.
//!
//! Decides whether a buy action becomes a fresh purchase or replaces the
//! user's current purchase. A user holds at most one current purchase; more
//! than one is reported rather than resolved.

use crate::offers::OfferSelector;
use crate::{RejectReason, Result, SubscriptionError};
use inapp_lib::{CatalogConfig, Offer, PlanTag, Product, ProrationMode, Purchase, PurchaseRequest};

/// Proration applied to every change request.
pub const CHANGE_PRORATION_MODE: ProrationMode = ProrationMode::ImmediateAndChargeFullPrice;

/// Build the request for buying `offer` of `product`.
///
/// `current_purchases`:
/// - `None`: a new purchase, holdings are not examined (e.g. prepaid top-up)
/// - one purchase: a change request replacing it
/// - more than one: rejected, regardless of `offer`
/// - empty: rejected, there is nothing to replace
///
/// A missing `offer` is rejected rather than producing an empty token.
pub fn resolve_intent(
    product: &Product,
    offer: Option<&Offer>,
    current_purchases: Option<&[Purchase]>,
) -> Result<PurchaseRequest> {
    if let Some(current) = current_purchases {
        if current.len() > 1 {
            tracing::warn!(
                count = current.len(),
                "user has more than one current purchase"
            );
            return Err(SubscriptionError::Rejected(
                RejectReason::MultipleCurrentPurchases {
                    count: current.len(),
                },
            ));
        }
    }

    let offer = offer.ok_or(SubscriptionError::Rejected(RejectReason::NoEligibleOffer))?;
    let product_id = product.product_id.clone();
    let offer_token = offer.offer_token.clone();

    match current_purchases {
        None => Ok(PurchaseRequest::New {
            product_id,
            offer_token,
        }),
        Some([current]) => Ok(PurchaseRequest::Change {
            product_id,
            offer_token,
            old_purchase_token: current.purchase_token.clone(),
            proration_mode: CHANGE_PRORATION_MODE,
        }),
        Some(_) => Err(SubscriptionError::Rejected(
            RejectReason::NoCurrentPurchase,
        )),
    }
}

/// Runs offer selection and intent resolution together.
#[derive(Clone, Debug)]
pub struct PurchaseIntentResolver<'c> {
    selector: OfferSelector<'c>,
}

impl<'c> PurchaseIntentResolver<'c> {
    pub fn new(config: &'c CatalogConfig) -> Self {
        Self {
            selector: OfferSelector::new(config),
        }
    }

    /// Resolve a buy action for `tag` on `product`.
    ///
    /// An offer lookup failure surfaces as [`RejectReason::NoEligibleOffer`],
    /// unless multiple current purchases already reject the request.
    pub fn resolve(
        &self,
        product: &Product,
        tag: PlanTag,
        current_purchases: Option<&[Purchase]>,
    ) -> Result<PurchaseRequest> {
        let offer = match self.selector.select(product, tag) {
            Ok(selection) => Some(selection.offer),
            Err(SubscriptionError::OfferNotFound { .. }) => None,
            Err(e) => return Err(e),
        };
        resolve_intent(product, offer, current_purchases)
    }
}
