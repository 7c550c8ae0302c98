//! # In-App Subscriptions
//!
//! Decides what a subscriber sees and what a buy button purchases.
//!
//! - [`classifier`] turns the current purchase set into four subscription flags
//! - [`screen`] picks the destination screen for those flags
//! - [`offers`] picks the cheapest eligible offer for a plan tag
//! - [`intent`] turns a buy action into a new or a change purchase request
//! - [`session`] holds the latest billing snapshot and recomputes the view
//!
//! Everything except [`session`] is a pure function of its inputs.

pub mod actions;
pub mod classifier;
pub mod intent;
pub mod offers;
pub mod screen;
pub mod session;

pub use actions::{available_actions, ActionKind, HoldingsPolicy, PlanAction};
pub use classifier::{PurchaseClassifier, SubscriptionState};
pub use intent::{resolve_intent, PurchaseIntentResolver, CHANGE_PRORATION_MODE};
pub use offers::{eligible_offers, least_priced_offer, select_offer, OfferSelection, OfferSelector};
pub use screen::{select_screen, DestinationScreen};
pub use session::{BillingSnapshot, SubscriptionSession, SubscriptionView};

use inapp_lib::{InAppError, InAppErrorCode, ProductId};
use serde::Serialize;

pub type Result<T> = std::result::Result<T, SubscriptionError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("no offer tagged '{tag}' for {product_id}")]
    OfferNotFound { product_id: ProductId, tag: String },
    #[error("product not loaded: {0}")]
    ProductNotFound(ProductId),
    #[error("purchase rejected: {0}")]
    Rejected(RejectReason),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("billing client error ({code:?}): {message}")]
    Client { code: InAppErrorCode, message: String },
}

impl SubscriptionError {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Retrying after reconnecting the billing client may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Client {
                code: InAppErrorCode::NotReady | InAppErrorCode::ServiceDisconnected,
                ..
            }
        )
    }
}

impl From<InAppError> for SubscriptionError {
    fn from(err: InAppError) -> Self {
        Self::Client {
            code: err.code(),
            message: err.message(),
        }
    }
}

/// Why a buy action produced no purchase request.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum RejectReason {
    #[error("multiple current purchases unsupported")]
    MultipleCurrentPurchases { count: usize },
    #[error("no eligible offer")]
    NoEligibleOffer,
    #[error("no current purchase to replace")]
    NoCurrentPurchase,
}
