// ABOUTME: Day rollover state machine closing the outgoing day into history
// ABOUTME: Seeds time bookkeeping, detects same-day calls, and rotates live signals on a new local day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Day rollover
//!
//! ```text
//!   Unseeded ──seed──▶ SameDay ◀──────────────┐
//!                        │ local date changes │
//!                        ▼                    │
//!                  RolloverNeeded ──rotate────┘
//! ```
//!
//! Rotation snapshots the live signals into `history.days[previous]` with
//! `closed = true` and starts an empty day. A snapshot that already exists
//! for the outgoing day keeps its `createdAt` and its ledger entries.

use std::mem;

use chrono::{DateTime, Utc};
use nutri_core::constants::plan::SCHEMA_VERSION;
use nutri_core::dates::{format_date, parse_day_id, to_iso};
use nutri_core::models::{CoachPlan, DaySnapshot, PlanTime, TodaySignals};
use nutri_intelligence::compute_day_food_totals;
use serde::Serialize;
use tracing::warn;

use super::merge::{macros_from_totals, union_entries_by_id, union_labels};

/// Result of [`super::CoachPlanStore::ensure_current_day`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolloverOutcome {
    /// Plan after the call
    pub plan: CoachPlan,
    /// Whether a day was closed
    pub rotated: bool,
    /// Day id that was closed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_day_id: Option<String>,
}

/// Position of a plan relative to the expected day
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayState {
    /// No time bookkeeping yet
    Unseeded,
    /// Already on the expected day
    SameDay,
    /// The local day changed since the last rotation
    RolloverNeeded {
        /// Day being closed
        previous_day_id: String,
    },
}

/// Classify `plan` against the day id expected for now
#[must_use]
pub fn day_state(plan: &CoachPlan, expected_day_id: &str) -> DayState {
    match plan.current_day_id() {
        None => DayState::Unseeded,
        Some(current) if current == expected_day_id => DayState::SameDay,
        Some(current) => DayState::RolloverNeeded {
            previous_day_id: current.to_owned(),
        },
    }
}

/// Fold live signals into a day snapshot
fn fold_signals(snapshot: &mut DaySnapshot, today: &TodaySignals, stamp: &str) {
    snapshot.food_entries = union_entries_by_id(&snapshot.food_entries, &today.food_entries);
    snapshot.foods = union_labels(&snapshot.foods, &today.foods, usize::MAX);
    snapshot.activities = union_labels(&snapshot.activities, &today.activities, usize::MAX);

    let ledger = compute_day_food_totals(&snapshot.food_entries);
    snapshot.kcal_in = snapshot.kcal_in.max(today.kcal_in).max(ledger.kcal);
    snapshot.kcal_out = snapshot.kcal_out.max(today.kcal_out);
    snapshot.balance = snapshot.kcal_in - snapshot.kcal_out;
    snapshot.macros = macros_from_totals(&ledger)
        .or(today.macros)
        .or(snapshot.macros);
    snapshot.weight_kg = today.weight_kg.or(snapshot.weight_kg);
    stamp.clone_into(&mut snapshot.updated_at);
}

/// Move the live signals into a closed history snapshot for `day_id`
fn close_day(plan: &mut CoachPlan, day_id: &str, now: DateTime<Utc>) {
    let Some((date, timezone)) = parse_day_id(day_id) else {
        warn!(day_id = %day_id, "Cannot close a day with an invalid id");
        return;
    };
    let today = mem::take(&mut plan.signals.today);
    let stamp = to_iso(now);
    let snapshot = plan
        .history
        .days
        .entry(day_id.to_owned())
        .or_insert_with(|| DaySnapshot {
            day_id: day_id.to_owned(),
            date_iso: format_date(date),
            timezone: timezone.to_owned(),
            created_at: stamp.clone(),
            ..DaySnapshot::default()
        });
    fold_signals(snapshot, &today, &stamp);
    snapshot.closed = true;
}

fn set_time(plan: &mut CoachPlan, expected_day_id: &str, timezone: &str, now: DateTime<Utc>) {
    plan.time = Some(PlanTime {
        current_day_id: expected_day_id.to_owned(),
        last_rotation_iso: to_iso(now),
        timezone: timezone.to_owned(),
    });
    plan.metadata.updated_at = Some(to_iso(now));
}

/// Seed time bookkeeping without rotating
///
/// Signals already labeled with another day are archived first so nothing
/// recorded before seeding is lost.
#[must_use]
pub fn seed_day(
    mut plan: CoachPlan,
    expected_day_id: &str,
    timezone: &str,
    now: DateTime<Utc>,
) -> CoachPlan {
    let stray_day_id = plan.signals.today.day_id.clone();
    if stray_day_id.is_empty() || stray_day_id == expected_day_id {
        expected_day_id.clone_into(&mut plan.signals.today.day_id);
    } else {
        if plan.signals.today.has_data() {
            close_day(&mut plan, &stray_day_id, now);
        }
        plan.signals.today = TodaySignals::empty(expected_day_id);
    }
    set_time(&mut plan, expected_day_id, timezone, now);
    plan
}

/// Close `previous_day_id` and start `expected_day_id`
#[must_use]
pub fn rotate_day(
    mut plan: CoachPlan,
    previous_day_id: &str,
    expected_day_id: &str,
    timezone: &str,
    now: DateTime<Utc>,
) -> CoachPlan {
    let live_day_id = plan.signals.today.day_id.clone();
    let outgoing = if parse_day_id(&live_day_id).is_some() {
        live_day_id.as_str()
    } else {
        previous_day_id
    };
    close_day(&mut plan, outgoing, now);
    plan.signals.today = TodaySignals::empty(expected_day_id);
    set_time(&mut plan, expected_day_id, timezone, now);
    plan.metadata.version = plan.metadata.version.max(SCHEMA_VERSION);
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nutri_core::models::MacroTotals;

    const TZ: &str = "Europe/Madrid";
    const MONDAY: &str = "2025-10-13@Europe/Madrid";
    const TUESDAY: &str = "2025-10-14@Europe/Madrid";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 14, 6, 0, 0).unwrap()
    }

    fn seeded_monday() -> CoachPlan {
        let mut plan = seed_day(CoachPlan::default(), MONDAY, TZ, now());
        plan.signals.today.kcal_in = 1900.0;
        plan.signals.today.kcal_out = 400.0;
        plan.signals.today.weight_kg = Some(72.5);
        plan.signals.today.foods = vec!["Pollo".into()];
        plan.signals.today.macros = Some(MacroTotals {
            protein_g: 90.0,
            carbs_g: 200.0,
            fat_g: 60.0,
            fiber_g: None,
        });
        plan.metadata.version = 1;
        plan
    }

    #[test]
    fn test_day_state() {
        assert_eq!(day_state(&CoachPlan::default(), TUESDAY), DayState::Unseeded);
        let plan = seeded_monday();
        assert_eq!(day_state(&plan, MONDAY), DayState::SameDay);
        assert_eq!(
            day_state(&plan, TUESDAY),
            DayState::RolloverNeeded {
                previous_day_id: MONDAY.into()
            }
        );
    }

    #[test]
    fn test_seed_keeps_unlabeled_signals() {
        let mut plan = CoachPlan::default();
        plan.signals.today.kcal_in = 500.0;
        let plan = seed_day(plan, TUESDAY, TZ, now());
        assert_eq!(plan.signals.today.day_id, TUESDAY);
        assert_eq!(plan.signals.today.kcal_in, 500.0);
        assert!(plan.history.days.is_empty());
    }

    #[test]
    fn test_rotate_closes_previous_day() {
        let plan = rotate_day(seeded_monday(), MONDAY, TUESDAY, TZ, now());
        let closed = &plan.history.days[MONDAY];
        assert!(closed.closed);
        assert_eq!(closed.date_iso, "2025-10-13");
        assert_eq!(closed.kcal_in, 1900.0);
        assert_eq!(closed.balance, 1500.0);
        assert_eq!(closed.weight_kg, Some(72.5));
        assert_eq!(closed.foods, ["Pollo"]);
        assert_eq!(plan.signals.today, TodaySignals::empty(TUESDAY));
        assert_eq!(plan.current_day_id(), Some(TUESDAY));
        assert_eq!(plan.metadata.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_rotate_preserves_existing_snapshot_creation() {
        let mut plan = seeded_monday();
        plan.history.days.insert(
            MONDAY.into(),
            DaySnapshot {
                day_id: MONDAY.into(),
                created_at: "2025-10-13T07:00:00.000Z".into(),
                kcal_out: 650.0,
                ..DaySnapshot::default()
            },
        );
        let plan = rotate_day(plan, MONDAY, TUESDAY, TZ, now());
        let closed = &plan.history.days[MONDAY];
        assert_eq!(closed.created_at, "2025-10-13T07:00:00.000Z");
        assert_eq!(closed.kcal_out, 650.0);
    }
}
