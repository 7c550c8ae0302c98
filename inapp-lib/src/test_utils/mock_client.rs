//! Recording mock of the purchasing collaborator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::{InAppError, Product, Purchase, PurchaseRequest, PurchasingClient, Result};
use async_trait::async_trait;

/// In-memory [`PurchasingClient`] that records launched flows.
pub struct MockPurchasingClient {
    ready: AtomicBool,
    products: RwLock<Vec<Product>>,
    purchases: RwLock<Vec<Purchase>>,
    launched: RwLock<Vec<PurchaseRequest>>,
}

impl MockPurchasingClient {
    /// A connected client with no products or purchases.
    pub fn ready() -> Self {
        Self {
            ready: AtomicBool::new(true),
            products: RwLock::new(Vec::new()),
            purchases: RwLock::new(Vec::new()),
            launched: RwLock::new(Vec::new()),
        }
    }

    /// A client whose connection is not established.
    pub fn disconnected() -> Self {
        let client = Self::ready();
        client.set_ready(false);
        client
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        *self.products.write().unwrap() = products;
        self
    }

    pub fn with_purchases(self, purchases: Vec<Purchase>) -> Self {
        *self.purchases.write().unwrap() = purchases;
        self
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Requests passed to `launch_purchase_flow`, oldest first.
    pub fn launched(&self) -> Vec<PurchaseRequest> {
        self.launched.read().unwrap().clone()
    }
}

#[async_trait]
impl PurchasingClient for MockPurchasingClient {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn query_products(&self) -> Result<Vec<Product>> {
        if !self.is_ready() {
            return Err(InAppError::NotReady);
        }
        Ok(self.products.read().unwrap().clone())
    }

    async fn query_purchases(&self) -> Result<Vec<Purchase>> {
        if !self.is_ready() {
            return Err(InAppError::NotReady);
        }
        Ok(self.purchases.read().unwrap().clone())
    }

    async fn launch_purchase_flow(&self, request: &PurchaseRequest) -> Result<()> {
        if !self.is_ready() {
            return Err(InAppError::NotReady);
        }
        self.launched.write().unwrap().push(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestFixtures;

    #[tokio::test]
    async fn test_disconnected_client_refuses_calls() {
        let client = MockPurchasingClient::disconnected().with_products(TestFixtures::catalog());
        assert!(matches!(client.query_products().await, Err(InAppError::NotReady)));

        client.set_ready(true);
        assert_eq!(client.query_products().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_records_launched_requests() {
        let client = MockPurchasingClient::ready();
        let request = PurchaseRequest::New {
            product_id: TestFixtures::BASIC.into(),
            offer_token: "monthly-basic-offer".into(),
        };

        client.launch_purchase_flow(&request).await.unwrap();
        assert_eq!(client.launched(), vec![request]);
    }
}
