//! Catalog configuration.
//!
//! Store listings use arbitrary product ids and offer tags; this maps the
//! two subscription tiers and six plan tags onto them.

use crate::plan::{PlanTag, Tier};
use crate::{InAppError, ProductId, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

fn default_basic_product() -> ProductId {
    ProductId::new("basic_subscription")
}

fn default_premium_product() -> ProductId {
    ProductId::new("premium_subscription")
}

/// Offer tag overrides keyed by any spelling `PlanTag::from_str` accepts.
fn deserialize_offer_tags<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<PlanTag, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            PlanTag::from_str(&key)
                .map(|tag| (tag, value))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

/// Product ids and offer tags used by the subscription catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base product of the basic tier.
    #[serde(default = "default_basic_product")]
    pub basic_product_id: ProductId,

    /// Base product of the premium tier.
    #[serde(default = "default_premium_product")]
    pub premium_product_id: ProductId,

    /// Store offer tag per plan tag. Missing entries use the canonical key.
    /// Keys are matched case-insensitively, like `PlanTag::from_str`.
    #[serde(default, deserialize_with = "deserialize_offer_tags")]
    pub offer_tags: BTreeMap<PlanTag, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            basic_product_id: default_basic_product(),
            premium_product_id: default_premium_product(),
            offer_tags: BTreeMap::new(),
        }
    }
}

impl CatalogConfig {
    pub fn new(
        basic_product_id: impl Into<ProductId>,
        premium_product_id: impl Into<ProductId>,
    ) -> Self {
        Self {
            basic_product_id: basic_product_id.into(),
            premium_product_id: premium_product_id.into(),
            ..Default::default()
        }
    }

    /// Override the store offer tag used for `tag`.
    pub fn with_offer_tag(mut self, tag: PlanTag, offer_tag: impl Into<String>) -> Self {
        self.offer_tags.insert(tag, offer_tag.into());
        self
    }

    /// Base product id of `tier`.
    pub fn product_for(&self, tier: Tier) -> &ProductId {
        match tier {
            Tier::Basic => &self.basic_product_id,
            Tier::Premium => &self.premium_product_id,
        }
    }

    /// Tier whose base product is `product_id`.
    pub fn tier_of(&self, product_id: &ProductId) -> Option<Tier> {
        if product_id == &self.basic_product_id {
            Some(Tier::Basic)
        } else if product_id == &self.premium_product_id {
            Some(Tier::Premium)
        } else {
            None
        }
    }

    /// Store offer tag matched against offers for `tag`.
    pub fn offer_tag(&self, tag: PlanTag) -> &str {
        self.offer_tags
            .get(&tag)
            .map(String::as_str)
            .unwrap_or_else(|| tag.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        if self.basic_product_id.as_str().trim().is_empty() {
            return Err(InAppError::invalid_data(
                "basic_product_id",
                "must not be empty",
            ));
        }
        if self.premium_product_id.as_str().trim().is_empty() {
            return Err(InAppError::invalid_data(
                "premium_product_id",
                "must not be empty",
            ));
        }
        if self.basic_product_id == self.premium_product_id {
            return Err(InAppError::invalid_data(
                "premium_product_id",
                "must differ from basic_product_id",
            ));
        }
        if let Some((tag, _)) = self.offer_tags.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(InAppError::invalid_data(
                "offer_tags",
                format!("override for {} is empty", tag),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(path), fields(path = %path.as_ref().display())))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }
}
