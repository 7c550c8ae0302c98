//! Subscription session.
//!
//! Owns the latest billing snapshot and recomputes the subscription view
//! whenever the purchasing collaborator pushes an update. Snapshots are
//! replaced wholesale, never patched; recomputation is synchronous and pure.
//!
//! # Example
//!
//! ```ignore
//! use inapp_subscriptions::SubscriptionSession;
//! use tokio::sync::mpsc;
//!
//! let session = Arc::new(SubscriptionSession::new(config)?);
//! let (tx, rx) = mpsc::channel(16);
//! tokio::spawn({
//!     let session = session.clone();
//!     async move { session.run(rx).await }
//! });
//!
//! let mut views = session.subscribe();
//! tx.send(BillingEvent::PurchasesUpdated(purchases)).await?;
//! views.changed().await?;
//! println!("show {}", views.borrow().destination);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::actions::{available_actions, HoldingsPolicy, PlanAction};
use crate::classifier::{PurchaseClassifier, SubscriptionState};
use crate::intent::PurchaseIntentResolver;
use crate::screen::{select_screen, DestinationScreen};
use crate::{Result, SubscriptionError};
use inapp_lib::{
    BillingEvent, CatalogConfig, InAppError, PlanTag, Product, ProductId, Purchase, PurchaseRequest,
    PurchasingClient, Tier,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

/// Latest data received from the purchasing collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BillingSnapshot {
    pub connected: bool,
    pub products: HashMap<ProductId, Product>,
    pub purchases: Vec<Purchase>,
}

/// Everything the UI derives from a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionView {
    pub connected: bool,
    pub state: SubscriptionState,
    pub destination: DestinationScreen,
    /// A completed purchase has not been acknowledged yet.
    pub awaiting_acknowledgement: bool,
}

impl SubscriptionView {
    fn derive(classifier: &PurchaseClassifier, snapshot: &BillingSnapshot) -> Self {
        let state = classifier.classify(&snapshot.purchases);
        Self {
            connected: snapshot.connected,
            state,
            destination: select_screen(&state),
            awaiting_acknowledgement: snapshot
                .purchases
                .iter()
                .any(Purchase::awaits_acknowledgement),
        }
    }
}

/// Single-writer owner of the billing snapshot.
pub struct SubscriptionSession {
    config: CatalogConfig,
    classifier: PurchaseClassifier,
    snapshot: RwLock<Arc<BillingSnapshot>>,
    view_tx: watch::Sender<SubscriptionView>,
}

impl SubscriptionSession {
    /// Create a session with an empty, disconnected snapshot.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| SubscriptionError::Config(e.to_string()))?;

        let classifier = PurchaseClassifier::from_config(&config);
        let snapshot = BillingSnapshot::default();
        let (view_tx, _) = watch::channel(SubscriptionView::derive(&classifier, &snapshot));

        Ok(Self {
            config,
            classifier,
            snapshot: RwLock::new(Arc::new(snapshot)),
            view_tx,
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Current snapshot. Later updates do not affect the returned value.
    pub fn snapshot(&self) -> Arc<BillingSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Latest derived view.
    pub fn view(&self) -> SubscriptionView {
        *self.view_tx.borrow()
    }

    /// Receiver notified after every recomputation.
    pub fn subscribe(&self) -> watch::Receiver<SubscriptionView> {
        self.view_tx.subscribe()
    }

    /// Apply one inbound event and recompute the view.
    pub fn apply(&self, event: BillingEvent) -> SubscriptionView {
        let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        let mut next = BillingSnapshot::clone(&guard);

        match event {
            BillingEvent::ProductsUpdated(products) => {
                if products.is_empty() {
                    tracing::warn!("billing service returned no product details");
                }
                next.products = products
                    .into_iter()
                    .map(|p| (p.product_id.clone(), p))
                    .collect();
            }
            BillingEvent::PurchasesUpdated(purchases) => {
                next.purchases = purchases;
            }
            BillingEvent::ConnectionChanged(connected) => {
                next.connected = connected;
            }
        }

        let view = SubscriptionView::derive(&self.classifier, &next);
        *guard = Arc::new(next);
        drop(guard);

        let previous = self.view_tx.send_replace(view);
        if previous.destination != view.destination {
            tracing::debug!(
                from = %previous.destination,
                to = %view.destination,
                "destination screen changed"
            );
        }
        view
    }

    pub fn on_products_updated(&self, products: Vec<Product>) -> SubscriptionView {
        self.apply(BillingEvent::ProductsUpdated(products))
    }

    pub fn on_purchases_updated(&self, purchases: Vec<Purchase>) -> SubscriptionView {
        self.apply(BillingEvent::PurchasesUpdated(purchases))
    }

    pub fn on_connection_changed(&self, connected: bool) -> SubscriptionView {
        self.apply(BillingEvent::ConnectionChanged(connected))
    }

    /// Consume `events` until every sender is dropped.
    pub async fn run(&self, mut events: mpsc::Receiver<BillingEvent>) {
        while let Some(event) = events.recv().await {
            self.apply(event);
        }
        tracing::debug!("billing event stream closed");
    }

    /// Re-query products and purchases from `client`.
    pub async fn refresh(&self, client: &dyn PurchasingClient) -> Result<SubscriptionView> {
        let products = client.query_products().await?;
        let purchases = client.query_purchases().await?;
        self.on_connection_changed(client.is_ready());
        self.on_products_updated(products);
        Ok(self.on_purchases_updated(purchases))
    }

    /// Base product of `tier` in the current snapshot.
    pub fn product(&self, tier: Tier) -> Option<Product> {
        let product_id = self.config.product_for(tier);
        self.snapshot().products.get(product_id).cloned()
    }

    /// Buy actions available on the current destination screen.
    pub fn actions(&self) -> Vec<PlanAction> {
        available_actions(self.view().destination)
    }

    /// Resolve a purchase of `tag` against the current snapshot.
    pub fn prepare_purchase(
        &self,
        tag: PlanTag,
        holdings: HoldingsPolicy,
    ) -> Result<PurchaseRequest> {
        let snapshot = self.snapshot();
        let product_id = self.config.product_for(tag.tier());
        let product = snapshot
            .products
            .get(product_id)
            .ok_or_else(|| SubscriptionError::ProductNotFound(product_id.clone()))?;

        let current = match holdings {
            HoldingsPolicy::Ignore => None,
            HoldingsPolicy::ReplaceCurrent => Some(snapshot.purchases.as_slice()),
        };

        PurchaseIntentResolver::new(&self.config).resolve(product, tag, current)
    }

    pub fn prepare_action(&self, action: &PlanAction) -> Result<PurchaseRequest> {
        self.prepare_purchase(action.tag, action.holdings)
    }

    /// Resolve a purchase and hand it to `client`.
    ///
    /// The outcome arrives later as a purchases update.
    pub async fn purchase(
        &self,
        client: &dyn PurchasingClient,
        tag: PlanTag,
        holdings: HoldingsPolicy,
    ) -> Result<PurchaseRequest> {
        let request = self.prepare_purchase(tag, holdings)?;
        if !client.is_ready() {
            tracing::warn!("purchase flow requested while billing client is not ready");
            return Err(InAppError::NotReady.into());
        }
        client.launch_purchase_flow(&request).await?;
        tracing::info!(
            product = %request.product_id(),
            change = request.is_change(),
            "purchase flow launched"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RejectReason;
    use inapp_lib::test_utils::{
        assert_change_purchase, assert_new_purchase, prepaid_purchase, renewing_purchase,
        MockPurchasingClient, TestFixtures,
    };

    fn session() -> SubscriptionSession {
        let session = SubscriptionSession::new(TestFixtures::config()).unwrap();
        session.on_connection_changed(true);
        session.on_products_updated(TestFixtures::catalog());
        session
    }

    #[test]
    fn test_initial_view_is_catalog() {
        let session = SubscriptionSession::new(TestFixtures::config()).unwrap();
        let view = session.view();
        assert!(!view.connected);
        assert!(view.state.is_empty());
        assert_eq!(view.destination, DestinationScreen::Catalog);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = CatalogConfig::new("same", "same");
        assert!(matches!(
            SubscriptionSession::new(config),
            Err(SubscriptionError::Config(_))
        ));
    }

    #[test]
    fn test_purchase_update_recomputes_destination() {
        let session = session();
        let view =
            session.on_purchases_updated(vec![renewing_purchase("p1", TestFixtures::PREMIUM)]);
        assert_eq!(view.destination, DestinationScreen::PremiumRenewableProfile);
        assert_eq!(session.view(), view);

        let view = session.on_purchases_updated(vec![]);
        assert_eq!(view.destination, DestinationScreen::Catalog);
    }

    #[test]
    fn test_snapshot_replaced_wholesale() {
        let session = session();
        session.on_purchases_updated(vec![prepaid_purchase("p1", TestFixtures::BASIC)]);
        let before = session.snapshot();

        session.on_purchases_updated(vec![renewing_purchase("p2", TestFixtures::BASIC)]);
        let after = session.snapshot();

        assert_eq!(before.purchases[0].purchase_token.as_str(), "p1");
        assert_eq!(after.purchases[0].purchase_token.as_str(), "p2");
        assert_eq!(after.products.len(), 2);
    }

    #[test]
    fn test_awaiting_acknowledgement() {
        let session = session();
        let purchase = renewing_purchase("p1", TestFixtures::BASIC).acknowledged(false);
        assert!(session.on_purchases_updated(vec![purchase.clone()]).awaiting_acknowledgement);
        assert!(
            !session
                .on_purchases_updated(vec![purchase.acknowledged(true)])
                .awaiting_acknowledgement
        );
    }

    #[test]
    fn test_prepare_top_up_ignores_holdings() {
        let session = session();
        session.on_purchases_updated(vec![
            prepaid_purchase("a", TestFixtures::BASIC),
            prepaid_purchase("b", TestFixtures::PREMIUM),
        ]);

        let request = session
            .prepare_purchase(PlanTag::PrepaidBasic, HoldingsPolicy::Ignore)
            .unwrap();
        assert_new_purchase(&request, TestFixtures::BASIC, "prepaid-basic-offer");
    }

    #[test]
    fn test_prepare_conversion_replaces_current() {
        let session = session();
        session.on_purchases_updated(vec![prepaid_purchase("prepaid", TestFixtures::PREMIUM)]);
        assert_eq!(
            session.view().destination,
            DestinationScreen::PremiumPrepaidProfile
        );

        let convert = session.actions()[1];
        let request = session.prepare_action(&convert).unwrap();
        assert_change_purchase(
            &request,
            TestFixtures::PREMIUM,
            "monthly-premium-offer",
            "prepaid",
        );
    }

    #[test]
    fn test_prepare_rejects_multiple_holdings() {
        let session = session();
        session.on_purchases_updated(vec![
            renewing_purchase("a", TestFixtures::BASIC),
            renewing_purchase("b", TestFixtures::PREMIUM),
        ]);

        let err = session
            .prepare_purchase(PlanTag::YearlyPremium, HoldingsPolicy::ReplaceCurrent)
            .unwrap_err();
        assert_eq!(
            err,
            SubscriptionError::Rejected(RejectReason::MultipleCurrentPurchases { count: 2 })
        );
    }

    #[test]
    fn test_prepare_missing_product() {
        let session = SubscriptionSession::new(TestFixtures::config()).unwrap();
        let err = session
            .prepare_purchase(PlanTag::MonthlyBasic, HoldingsPolicy::Ignore)
            .unwrap_err();
        assert_eq!(
            err,
            SubscriptionError::ProductNotFound(ProductId::new(TestFixtures::BASIC))
        );
    }

    #[tokio::test]
    async fn test_purchase_launches_flow() {
        let session = session();
        let client = MockPurchasingClient::ready();

        let request = session
            .purchase(&client, PlanTag::MonthlyBasic, HoldingsPolicy::Ignore)
            .await
            .unwrap();

        assert_eq!(client.launched(), vec![request]);
    }

    #[tokio::test]
    async fn test_purchase_reports_client_failure() {
        let session = session();
        let client = MockPurchasingClient::disconnected();

        let err = session
            .purchase(&client, PlanTag::MonthlyBasic, HoldingsPolicy::Ignore)
            .await
            .unwrap_err();
        assert!(matches!(err, SubscriptionError::Client { .. }));
        assert!(client.launched().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_purchase_not_launched() {
        let session = session();
        session.on_purchases_updated(vec![]);
        let client = MockPurchasingClient::ready();

        let err = session
            .purchase(&client, PlanTag::YearlyBasic, HoldingsPolicy::ReplaceCurrent)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SubscriptionError::Rejected(RejectReason::NoCurrentPurchase)
        );
        assert!(client.launched().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_from_client() {
        let session = SubscriptionSession::new(TestFixtures::config()).unwrap();
        let client = MockPurchasingClient::ready()
            .with_products(TestFixtures::catalog())
            .with_purchases(vec![prepaid_purchase("p", TestFixtures::BASIC)]);

        let view = session.refresh(&client).await.unwrap();
        assert!(view.connected);
        assert_eq!(view.destination, DestinationScreen::BasicPrepaidProfile);
        assert!(session.product(Tier::Premium).is_some());
    }

    #[tokio::test]
    async fn test_run_consumes_event_stream() {
        let session = Arc::new(SubscriptionSession::new(TestFixtures::config()).unwrap());
        let mut views = session.subscribe();
        let (tx, rx) = mpsc::channel(8);

        let handle = tokio::spawn({
            let session = session.clone();
            async move { session.run(rx).await }
        });

        tx.send(BillingEvent::ConnectionChanged(true)).await.unwrap();
        tx.send(BillingEvent::PurchasesUpdated(vec![renewing_purchase(
            "p1",
            TestFixtures::BASIC,
        )]))
        .await
        .unwrap();
        drop(tx);
        handle.await.unwrap();

        assert!(views.has_changed().unwrap());
        let view = *views.borrow_and_update();
        assert!(view.connected);
        assert_eq!(view.destination, DestinationScreen::BasicRenewableProfile);
    }
}
