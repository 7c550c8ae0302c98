//! CLI command implementations

pub mod buy;
pub mod config;
pub mod offer;
pub mod screen;
pub mod watch;

use anyhow::{Context, Result};
use inapp_lib::{CatalogConfig, Product, Purchase};
use inapp_subscriptions::SubscriptionSession;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::client::SnapshotClient;

/// Products and purchases as stored in a snapshot file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub purchases: Vec<Purchase>,
}

/// Load the catalog configuration, falling back to defaults
pub fn load_config(path: Option<&Path>) -> Result<CatalogConfig> {
    match path {
        Some(path) => CatalogConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(CatalogConfig::default()),
    }
}

/// Read a snapshot file
pub fn load_snapshot(path: &Path) -> Result<SnapshotFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid snapshot JSON in {}", path.display()))
}

/// Build a session primed from a snapshot file
pub async fn open_session(
    config: CatalogConfig,
    snapshot: &Path,
) -> Result<(SubscriptionSession, SnapshotClient)> {
    let client = SnapshotClient::new(load_snapshot(snapshot)?);
    let session = SubscriptionSession::new(config)?;
    session.refresh(&client).await?;
    Ok((session, client))
}
