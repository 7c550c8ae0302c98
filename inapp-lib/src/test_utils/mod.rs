//! Test utilities for in-app billing.
//!
//! This module provides testing infrastructure including:
//! - A recording mock of the purchasing collaborator
//! - Fixtures for catalog products and purchase snapshots
//! - Assertion helpers for purchase requests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inapp_lib::test_utils::{MockPurchasingClient, TestFixtures};
//!
//! let client = MockPurchasingClient::ready()
//!     .with_products(TestFixtures::catalog());
//! client.launch_purchase_flow(&request).await?;
//! assert_eq!(client.launched().len(), 1);
//! ```

mod assertions;
mod fixtures;
mod mock_client;

pub use fixtures::{offer, prepaid_purchase, renewing_purchase, TestFixtures};

pub use mock_client::MockPurchasingClient;

pub use assertions::{assert_change_purchase, assert_new_purchase};
