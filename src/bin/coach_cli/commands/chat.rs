// ABOUTME: Message ingestion command for coach-cli
// ABOUTME: Runs one message through the chat logic and prints the outcome with a fallback reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use nutri_coach::chat::{
    confirm_food_mutation, fallback_reply, ingest_user_message, MutationStatus,
};
use nutri_coach::coach_plan::CoachPlanStore;
use nutri_coach::config::CoachConfig;
use nutri_coach::dashboard::build_dashboard_metrics;
use nutri_coach::storage::FileStorage;
use serde_json::json;
use tracing::info;

use crate::helpers::display::print_json;
use crate::helpers::events::load_events;

/// Ingest `text` and print the outcome, the dashboard, and a reply
pub fn ingest(
    store: &CoachPlanStore<FileStorage>,
    config: &CoachConfig,
    text: &str,
    timezone: Option<&str>,
    confirm: bool,
    events: Option<&Path>,
    now: DateTime<Utc>,
) -> Result<()> {
    let stored = store.get_coach_plan();
    let timezone = config.resolve_timezone(timezone, stored.as_ref().and_then(|plan| plan.timezone()));
    let mut outcome = ingest_user_message(store, text, now, timezone, config.policy)?;

    if confirm && outcome.status == MutationStatus::PendingConfirmation {
        info!("Applying weekday-dated entry on request");
        outcome.plan = confirm_food_mutation(store, outcome.mutation.clone(), now)?;
        outcome.status = MutationStatus::Applied;
    }

    let events = load_events(events)?;
    let metrics = build_dashboard_metrics(&events, &outcome.plan, now);
    let reply = fallback_reply(&outcome, &metrics, &outcome.plan.cognitive_profile);
    print_json(&json!({
        "outcome": outcome,
        "dashboard": metrics,
        "reply": reply,
    }))
}
