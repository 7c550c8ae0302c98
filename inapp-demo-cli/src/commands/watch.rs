//! Watch command - replay a billing event log through a session

use anyhow::{Context, Result};
use inapp_lib::{BillingEvent, CatalogConfig};
use inapp_subscriptions::{SubscriptionSession, SubscriptionView};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::ui;

pub async fn run(config: CatalogConfig, events: &Path) -> Result<()> {
    let (count, view) = replay(config, events).await?;
    ui::success(&format!("Replayed {} events, ending on {}", count, view.destination));
    Ok(())
}

/// Feed one JSON `BillingEvent` per line into a session.
///
/// Views are printed as the session publishes them. The view channel only
/// keeps the latest value, so views replaced before the printer wakes up
/// are skipped. Returns the number of events and the final view.
pub async fn replay(config: CatalogConfig, events: &Path) -> Result<(usize, SubscriptionView)> {
    let session = Arc::new(SubscriptionSession::new(config)?);
    let mut views = session.subscribe();
    let (tx, rx) = mpsc::channel(16);

    let runner = tokio::spawn({
        let session = session.clone();
        async move { session.run(rx).await }
    });

    let printer = tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = *views.borrow_and_update();
            ui::key_value(
                if view.connected { "connected" } else { "offline" },
                view.destination.as_str(),
            );
        }
    });

    let file = tokio::fs::File::open(events)
        .await
        .with_context(|| format!("Failed to open event log {}", events.display()))?;
    let mut lines = BufReader::new(file).lines();
    let mut line_no = 0usize;
    let mut count = 0usize;

    ui::header("Replaying events");
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        let event: BillingEvent = serde_json::from_str(&line)
            .with_context(|| format!("Invalid event on line {}", line_no))?;
        tracing::debug!(line = line_no, ?event, "replaying event");
        tx.send(event).await.context("Session stopped early")?;
        count += 1;
    }

    drop(tx);
    runner.await?;
    let view = session.view();
    drop(session);
    printer.await?;

    Ok((count, view))
}
