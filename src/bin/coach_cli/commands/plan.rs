// ABOUTME: Plan inspection and rollover commands for coach-cli
// ABOUTME: Prints the stored plan and drives the day rollover on demand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::{DateTime, Utc};
use nutri_coach::coach_plan::CoachPlanStore;
use nutri_coach::config::CoachConfig;
use nutri_coach::storage::FileStorage;
use tracing::info;

use crate::helpers::display::print_json;

/// Print the stored plan, or `null` when nothing is stored
pub fn show(store: &CoachPlanStore<FileStorage>) -> Result<()> {
    print_json(&store.get_coach_plan())
}

/// Rotate the plan onto the current local day
pub fn rollover(
    store: &CoachPlanStore<FileStorage>,
    config: &CoachConfig,
    timezone: Option<&str>,
    now: DateTime<Utc>,
) -> Result<()> {
    let plan = store.get_coach_plan();
    let plan_timezone = plan.as_ref().and_then(|plan| plan.timezone());
    let timezone = config.resolve_timezone(timezone, plan_timezone);
    let outcome = store.ensure_current_day(now, timezone)?;
    if outcome.rotated {
        info!(
            previous_day_id = outcome.previous_day_id.as_deref().unwrap_or_default(),
            "Closed previous day"
        );
    }
    print_json(&outcome)
}
