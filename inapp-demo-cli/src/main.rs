//! In-App Subscriptions Demo CLI
//!
//! Command-line interface for exploring subscription screens, offer
//! selection and purchase requests against JSON snapshots.

use anyhow::Result;
use clap::{Parser, Subcommand};
use inapp_lib::PlanTag;
use std::path::PathBuf;

mod client;
mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "inapp-demo")]
#[command(about = "In-app subscriptions demo - screens, offers and purchase requests", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog configuration file (JSON)
    #[arg(long, global = true, env = "INAPP_DEMO_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show subscription flags, destination screen and available actions
    Screen {
        /// Snapshot file with products and purchases
        snapshot: PathBuf,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the offer that would be purchased for a plan tag
    Offer {
        /// Snapshot file with products and purchases
        snapshot: PathBuf,

        /// Plan tag (e.g. monthly-basic, prepaid-premium)
        tag: PlanTag,
    },

    /// Resolve a purchase and launch the purchase flow
    Buy {
        /// Snapshot file with products and purchases
        snapshot: PathBuf,

        /// Plan tag (e.g. yearly-premium)
        tag: PlanTag,

        /// Replace the current purchase even if the screen would not
        #[arg(long)]
        replace: bool,
    },

    /// Replay a billing event log (one JSON event per line)
    Watch {
        /// Event log file
        events: PathBuf,
    },

    /// Show the effective catalog configuration
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("inapp_demo=debug,inapp_lib=debug,inapp_subscriptions=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("inapp_demo=info,inapp_lib=warn,inapp_subscriptions=warn")
            .init();
    }

    let config = match commands::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            ui::error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Dispatch commands
    match cli.command {
        Commands::Screen { snapshot, json } => {
            commands::screen::run(config, &snapshot, json).await?;
        }
        Commands::Offer { snapshot, tag } => {
            commands::offer::run(config, &snapshot, tag).await?;
        }
        Commands::Buy {
            snapshot,
            tag,
            replace,
        } => {
            commands::buy::run(config, &snapshot, tag, replace).await?;
        }
        Commands::Watch { events } => {
            commands::watch::run(config, &events).await?;
        }
        Commands::Config { json } => {
            commands::config::run(&config, json)?;
        }
    }

    Ok(())
}
