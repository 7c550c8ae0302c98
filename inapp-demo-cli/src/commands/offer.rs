//! Offer command - show the offer a plan tag would purchase

use anyhow::{Context, Result};
use inapp_lib::{CatalogConfig, PlanTag};
use inapp_subscriptions::OfferSelector;
use std::path::Path;

use crate::ui;

pub async fn run(config: CatalogConfig, snapshot: &Path, tag: PlanTag) -> Result<()> {
    let (session, _client) = super::open_session(config, snapshot).await?;
    let product = session.product(tag.tier()).with_context(|| {
        format!(
            "Product {} missing from snapshot",
            session.config().product_for(tag.tier())
        )
    })?;

    let selection = match OfferSelector::new(session.config()).select(&product, tag) {
        Ok(selection) => selection,
        Err(e) => {
            ui::error(&e.to_string());
            return Ok(());
        }
    };

    ui::header(&format!("Offer for {}", tag));
    ui::key_value("Product", product.product_id.as_str());
    ui::key_value("Offer token", selection.offer.offer_token.as_str());
    ui::key_value("Base plan", &selection.offer.base_plan_id);
    if let Some(offer_id) = &selection.offer.offer_id {
        ui::key_value("Offer id", offer_id);
    }

    ui::separator();
    for (index, phase) in selection.offer.pricing_phases.iter().enumerate() {
        let marker = if index == selection.phase_index {
            " (cheapest)"
        } else {
            ""
        };
        ui::item(&format!(
            "{} / {}{}",
            phase.formatted_price(),
            phase.billing_period,
            marker
        ));
    }

    Ok(())
}
