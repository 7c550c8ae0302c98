//! Buy command - resolve and launch a purchase for a plan tag

use anyhow::Result;
use inapp_lib::{CatalogConfig, PlanTag, PurchaseRequest, PurchasingClient};
use inapp_subscriptions::{DestinationScreen, HoldingsPolicy, SubscriptionSession};
use std::path::Path;

use crate::ui;

pub async fn run(
    config: CatalogConfig,
    snapshot: &Path,
    tag: PlanTag,
    replace: bool,
) -> Result<()> {
    let (session, client) = super::open_session(config, snapshot).await?;
    buy(&session, &client, tag, replace).await?;
    Ok(())
}

/// Holdings policy for buying `tag` from the current screen.
///
/// `None` when the screen offers no action for `tag`; outside the catalog a
/// new purchase would sit next to the current one.
pub fn holdings_for(
    session: &SubscriptionSession,
    tag: PlanTag,
    replace: bool,
) -> Option<HoldingsPolicy> {
    if replace {
        return Some(HoldingsPolicy::ReplaceCurrent);
    }
    let action = session.actions().into_iter().find(|action| action.tag == tag);
    match action {
        Some(action) => Some(action.holdings),
        None if session.view().destination == DestinationScreen::Catalog => {
            Some(HoldingsPolicy::Ignore)
        }
        None => None,
    }
}

/// Launch the purchase of `tag`. Returns the launched request, if any.
pub async fn buy(
    session: &SubscriptionSession,
    client: &dyn PurchasingClient,
    tag: PlanTag,
    replace: bool,
) -> Result<Option<PurchaseRequest>> {
    let destination = session.view().destination;
    let Some(holdings) = holdings_for(session, tag, replace) else {
        ui::warning(&format!(
            "{} is not offered on {}; use --replace to replace the current purchase",
            tag, destination
        ));
        return Ok(None);
    };

    ui::info(&format!("Buying {} from {} ({:?})", tag, destination, holdings));

    match session.purchase(client, tag, holdings).await {
        Ok(request) => {
            if request.is_change() {
                ui::success("Change request launched");
            } else {
                ui::success("New purchase launched");
            }
            Ok(Some(request))
        }
        Err(e) if e.is_rejected() => {
            ui::warning(&e.to_string());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
