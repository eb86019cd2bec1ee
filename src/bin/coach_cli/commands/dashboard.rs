// ABOUTME: Dashboard command for coach-cli
// ABOUTME: Projects an exported event log and the stored plan into metrics or prompt context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use nutri_coach::chat::build_prompt_context;
use nutri_coach::coach_plan::CoachPlanStore;
use nutri_coach::dashboard::build_dashboard_metrics;
use nutri_coach::storage::FileStorage;

use crate::helpers::display::print_json;
use crate::helpers::events::load_events;

/// Print dashboard metrics, or the prompt context built from them
pub fn show(
    store: &CoachPlanStore<FileStorage>,
    events: &Path,
    context: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let events = load_events(Some(events))?;
    let plan = store.get_coach_plan().unwrap_or_default();
    let metrics = build_dashboard_metrics(&events, &plan, now);
    if context {
        print_json(&build_prompt_context(&plan, &metrics))
    } else {
        print_json(&metrics)
    }
}
