//! Purchasing client backed by a snapshot file.
//!
//! Stands in for the platform billing SDK: queries answer from the file and
//! launched purchase flows are printed instead of shown to a user.

use async_trait::async_trait;
use inapp_lib::{Product, Purchase, PurchaseRequest, PurchasingClient};

use crate::commands::SnapshotFile;
use crate::ui;

pub struct SnapshotClient {
    snapshot: SnapshotFile,
}

impl SnapshotClient {
    pub fn new(snapshot: SnapshotFile) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl PurchasingClient for SnapshotClient {
    fn is_ready(&self) -> bool {
        true
    }

    async fn query_products(&self) -> inapp_lib::Result<Vec<Product>> {
        Ok(self.snapshot.products.clone())
    }

    async fn query_purchases(&self) -> inapp_lib::Result<Vec<Purchase>> {
        Ok(self.snapshot.purchases.clone())
    }

    async fn launch_purchase_flow(&self, request: &PurchaseRequest) -> inapp_lib::Result<()> {
        tracing::debug!(product = %request.product_id(), "launching purchase flow");
        ui::header("Purchase Flow");
        ui::json(&serde_json::to_value(request)?);
        Ok(())
    }
}
