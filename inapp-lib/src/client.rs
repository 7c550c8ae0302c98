//! Purchasing collaborator boundary.
//!
//! The billing SDK, its connection lifecycle and acknowledgement of completed
//! purchases all live behind [`PurchasingClient`]. Results of a launched flow
//! come back asynchronously as [`BillingEvent::PurchasesUpdated`].

use crate::{Product, Purchase, PurchaseRequest, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Snapshot updates pushed by the purchasing collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum BillingEvent {
    /// Product details were (re)queried.
    ProductsUpdated(Vec<Product>),
    /// The current purchase set changed or was (re)queried.
    PurchasesUpdated(Vec<Purchase>),
    /// The billing connection was established (`true`) or lost.
    ConnectionChanged(bool),
}

/// Platform billing client.
#[async_trait]
pub trait PurchasingClient: Send + Sync {
    /// Whether the billing connection is established.
    fn is_ready(&self) -> bool;

    /// Query product details for the configured products.
    async fn query_products(&self) -> Result<Vec<Product>>;

    /// Query the user's current purchases.
    async fn query_purchases(&self) -> Result<Vec<Purchase>>;

    /// Hand a purchase request to the billing UI. Fire-and-forget.
    async fn launch_purchase_flow(&self, request: &PurchaseRequest) -> Result<()>;
}
