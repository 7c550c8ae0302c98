//! Test assertions for purchase requests.

use crate::PurchaseRequest;

/// Assert that `request` is a first-time purchase of `product_id` with `offer_token`.
///
/// # Panics
/// Panics if the request is a change request or targets another offer.
pub fn assert_new_purchase(request: &PurchaseRequest, product_id: &str, offer_token: &str) {
    match request {
        PurchaseRequest::New {
            product_id: pid,
            offer_token: token,
        } => {
            assert_eq!(pid.as_str(), product_id, "unexpected product");
            assert_eq!(token.as_str(), offer_token, "unexpected offer token");
        }
        other => panic!("expected a new purchase, got {:?}", other),
    }
}

/// Assert that `request` replaces `old_token` with `offer_token` of `product_id`.
///
/// # Panics
/// Panics if the request is a new purchase or any field differs.
pub fn assert_change_purchase(
    request: &PurchaseRequest,
    product_id: &str,
    offer_token: &str,
    old_token: &str,
) {
    match request {
        PurchaseRequest::Change {
            product_id: pid,
            offer_token: token,
            old_purchase_token,
            ..
        } => {
            assert_eq!(pid.as_str(), product_id, "unexpected product");
            assert_eq!(token.as_str(), offer_token, "unexpected offer token");
            assert_eq!(
                old_purchase_token.as_str(),
                old_token,
                "unexpected replaced purchase"
            );
        }
        other => panic!("expected a change purchase, got {:?}", other),
    }
}
