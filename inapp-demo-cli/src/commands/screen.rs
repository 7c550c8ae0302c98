//! Screen command - show the destination screen for a snapshot

use anyhow::Result;
use inapp_lib::CatalogConfig;
use std::path::Path;

use crate::ui;

pub async fn run(config: CatalogConfig, snapshot: &Path, json: bool) -> Result<()> {
    let (session, _client) = super::open_session(config, snapshot).await?;
    let view = session.view();

    if json {
        ui::json(&serde_json::to_value(view)?);
        return Ok(());
    }

    ui::header("Subscription State");
    ui::flag("Renewable basic", view.state.renewable_basic);
    ui::flag("Prepaid basic", view.state.prepaid_basic);
    ui::flag("Renewable premium", view.state.renewable_premium);
    ui::flag("Prepaid premium", view.state.prepaid_premium);

    ui::header("Destination");
    ui::key_value("Screen", view.destination.as_str());
    if view.awaiting_acknowledgement {
        ui::warning("A completed purchase has not been acknowledged yet");
    }

    ui::separator();
    for action in session.actions() {
        ui::item(&format!("{:?} → {}", action.kind, action.tag));
    }

    Ok(())
}
