//! Config command - print the effective catalog configuration

use anyhow::Result;
use inapp_lib::{CatalogConfig, PlanTag};

use crate::ui;

pub fn run(config: &CatalogConfig, json: bool) -> Result<()> {
    if json {
        ui::json(&serde_json::to_value(config)?);
        return Ok(());
    }

    ui::header("Catalog");
    ui::key_value("Basic product", config.basic_product_id.as_str());
    ui::key_value("Premium product", config.premium_product_id.as_str());

    ui::header("Offer tags");
    for tag in PlanTag::all() {
        ui::key_value(tag.as_str(), config.offer_tag(*tag));
    }

    Ok(())
}
