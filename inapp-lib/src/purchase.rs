//! Purchase records reported by the billing collaborator.

use crate::{ProductId, PurchaseToken};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a purchase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseState {
    Purchased,
    Pending,
    #[default]
    Unspecified,
}

/// A user's entitlement to one or more products.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub purchase_token: PurchaseToken,
    pub products: Vec<ProductId>,
    #[serde(default)]
    pub is_auto_renewing: bool,
    #[serde(default)]
    pub is_acknowledged: bool,
    #[serde(default)]
    pub state: PurchaseState,
    #[serde(default)]
    pub order_id: Option<String>,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub purchase_time_millis: i64,
}

impl Purchase {
    pub fn new(purchase_token: impl Into<PurchaseToken>, product: impl Into<ProductId>) -> Self {
        Self {
            purchase_token: purchase_token.into(),
            products: vec![product.into()],
            is_auto_renewing: false,
            is_acknowledged: false,
            state: PurchaseState::Purchased,
            order_id: None,
            purchase_time_millis: 0,
        }
    }

    pub fn auto_renewing(mut self, auto_renewing: bool) -> Self {
        self.is_auto_renewing = auto_renewing;
        self
    }

    pub fn acknowledged(mut self, acknowledged: bool) -> Self {
        self.is_acknowledged = acknowledged;
        self
    }

    pub fn with_state(mut self, state: PurchaseState) -> Self {
        self.state = state;
        self
    }

    pub fn covers(&self, product_id: &ProductId) -> bool {
        self.products.contains(product_id)
    }

    /// Completed but not yet acknowledged by the collaborator.
    pub fn awaits_acknowledgement(&self) -> bool {
        self.state == PurchaseState::Purchased && !self.is_acknowledged
    }

    pub fn purchased_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.purchase_time_millis)
    }
}
