// ABOUTME: Coach CLI - terminal driver for the Nutri Coach state derivation pipeline
// ABOUTME: Ingests messages, inspects and rotates the stored plan, and prints dashboard metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Record a message for today
//! coach-cli ingest --text "comí 2 huevos" --timezone Europe/Madrid
//!
//! # Record a weekday-dated message without the confirmation round trip
//! coach-cli ingest --text "el lunes comí arroz" --confirm
//!
//! # Show the stored plan
//! coach-cli plan
//!
//! # Close the previous day if the local date changed
//! coach-cli rollover --timezone America/Mexico_City
//!
//! # Dashboard over an exported event log
//! coach-cli dashboard --events events.json
//!
//! # Prompt context instead of raw metrics
//! coach-cli dashboard --events events.json --context
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use nutri_coach::coach_plan::CoachPlanStore;
use nutri_coach::config::CoachConfig;
use nutri_coach::logging::LoggingConfig;
use nutri_coach::storage::FileStorage;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "coach-cli",
    about = "Nutri Coach CLI",
    long_about = "Terminal driver for the Nutri Coach pipeline: message ingestion, plan inspection, day rollover, and dashboard metrics."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override (defaults to COACH_DATA_DIR or the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Plan slot, one per user
    #[arg(long, global = true, default_value = "default")]
    slot: String,

    /// Clock override as RFC 3339 (defaults to now)
    #[arg(long, global = true)]
    at: Option<DateTime<Utc>>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Process one user message
    Ingest {
        /// Message text
        #[arg(long)]
        text: String,

        /// IANA timezone of the user
        #[arg(long)]
        timezone: Option<String>,

        /// Apply weekday-dated entries without asking
        #[arg(long)]
        confirm: bool,

        /// Event log used for the reply's dashboard figures
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Print the stored plan
    Plan,

    /// Ensure the plan is on the current local day
    Rollover {
        /// IANA timezone of the user
        #[arg(long)]
        timezone: Option<String>,
    },

    /// Print dashboard metrics
    Dashboard {
        /// JSON array of chat events
        #[arg(long)]
        events: PathBuf,

        /// Print the prompt context instead of the metrics
        #[arg(long)]
        context: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let mut config = CoachConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let storage = FileStorage::new(&config.data_dir, &cli.slot)?;
    debug!(path = %storage.path().display(), "Using plan file");
    let store = CoachPlanStore::from_config(storage, &config);
    let now = cli.at.unwrap_or_else(Utc::now);

    match cli.command {
        Command::Ingest {
            text,
            timezone,
            confirm,
            events,
        } => {
            commands::chat::ingest(
                &store,
                &config,
                &text,
                timezone.as_deref(),
                confirm,
                events.as_deref(),
                now,
            )?;
        }
        Command::Plan => commands::plan::show(&store)?,
        Command::Rollover { timezone } => {
            commands::plan::rollover(&store, &config, timezone.as_deref(), now)?;
        }
        Command::Dashboard { events, context } => {
            commands::dashboard::show(&store, &events, context, now)?;
        }
    }

    Ok(())
}
