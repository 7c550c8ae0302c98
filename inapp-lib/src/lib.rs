//! In-app billing library.
//!
//! This crate holds the snapshot data model shared between the subscription
//! engine and the platform billing client, and stays stateless: the billing
//! SDK is injected by callers through [`PurchasingClient`].
//!
//! # Features
//!
//! - **Catalog model**: products, offers and pricing phases as reported by the store
//! - **Purchases**: the user's current entitlements
//! - **Plan tags**: closed enumeration of billing cadences per tier
//! - **Collaborator boundary**: trait-based purchasing client and inbound events
//!
//! # Example
//!
//! ```
//! use inapp_lib::{CatalogConfig, Offer, PlanTag, PricingPhase};
//!
//! let config = CatalogConfig::default().with_offer_tag(PlanTag::PrepaidBasic, "prepaidbasic");
//! let offer = Offer::new("token")
//!     .with_tag("PrepaidBasic")
//!     .with_phase(PricingPhase::recurring(3_490_000, "P1M"));
//!
//! assert!(offer.has_tag(config.offer_tag(PlanTag::PrepaidBasic)));
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod errors;
pub mod plan;
pub mod purchase;
pub mod request;

/// Test utilities for billing tests.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use catalog::{Offer, PricingPhase, Product, RecurrenceMode};
pub use client::{BillingEvent, PurchasingClient};
pub use config::CatalogConfig;
pub use errors::{InAppError, InAppErrorCode};
pub use plan::{PlanTag, Tier};
pub use purchase::{Purchase, PurchaseState};
pub use request::{ProrationMode, PurchaseRequest};

/// Common result alias for billing operations.
pub type Result<T> = std::result::Result<T, InAppError>;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Store identifier of a product.
    ///
    /// # Example
    ///
    /// ```
    /// use inapp_lib::ProductId;
    ///
    /// let product: ProductId = "premium_subscription".into();
    /// assert_eq!(product.as_str(), "premium_subscription");
    /// ```
    ProductId
);

string_id!(
    /// Opaque token selecting an offer in the purchase flow.
    OfferToken
);

string_id!(
    /// Opaque token identifying an existing purchase.
    PurchaseToken
);
