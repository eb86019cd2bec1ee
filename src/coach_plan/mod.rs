// ABOUTME: Coach plan store owning the per-user plan slot, day rollover, and ledger mutations
// ABOUTME: Loads through normalization, merges patches field by field, and persists through the storage port
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coach Plan Store
//!
//! Read-modify-write over a single storage slot. Reads never fail: absent,
//! corrupt, or unreachable state yields `None`. Writes surface storage
//! errors. There is no concurrency guard; the last writer wins.

/// Patch merging
pub mod merge;
/// Persisted JSON normalization
pub mod normalize;
/// Day rollover state machine
pub mod rollover;

pub use merge::merge_plan;
pub use normalize::normalize_plan;
pub use rollover::{DayState, RolloverOutcome};

use chrono::{DateTime, Utc};
use nutri_core::constants::plan::FALLBACK_TIMEZONE;
use nutri_core::dates::{build_day_id, parse_day_id, parse_timezone, to_iso};
use nutri_core::models::{CoachPlan, CoachPlanPatch, DaySnapshot};
use nutri_intelligence::{
    compute_day_food_totals, merge_food_entries, ParsedFoodMutation, TargetDayContext,
};
use tracing::{debug, info, warn};

use crate::config::CoachConfig;
use crate::errors::{AppError, AppResult};
use crate::storage::PlanStorage;
use merge::macros_from_totals;
use rollover::{day_state, rotate_day, seed_day};

/// Durable per-user coach plan
#[derive(Debug)]
pub struct CoachPlanStore<S> {
    storage: S,
    default_timezone: String,
}

fn new_snapshot(target: &TargetDayContext, stamp: &str) -> DaySnapshot {
    let timezone = parse_day_id(&target.day_id).map_or("", |(_, timezone)| timezone);
    DaySnapshot {
        day_id: target.day_id.clone(),
        date_iso: target.date_iso.clone(),
        timezone: timezone.to_owned(),
        created_at: stamp.to_owned(),
        updated_at: stamp.to_owned(),
        ..DaySnapshot::default()
    }
}

impl<S: PlanStorage> CoachPlanStore<S> {
    /// Store over `storage` with UTC as the last-resort timezone
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            default_timezone: FALLBACK_TIMEZONE.to_owned(),
        }
    }

    /// Store using the configured default timezone
    #[must_use]
    pub fn from_config(storage: S, config: &CoachConfig) -> Self {
        Self::new(storage).with_default_timezone(config.default_timezone.clone())
    }

    /// Override the timezone used when neither caller nor plan has a valid one
    #[must_use]
    pub fn with_default_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.default_timezone = timezone.into();
        self
    }

    /// Underlying storage backend
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Load and normalize the persisted plan
    ///
    /// Returns `None` when nothing is stored, the stored value is not an
    /// object, there is no persistence context, or the backend fails.
    #[must_use]
    pub fn get_coach_plan(&self) -> Option<CoachPlan> {
        if !self.storage.is_available() {
            debug!("Plan storage unavailable");
            return None;
        }
        match self.storage.load() {
            Ok(Some(value)) => normalize_plan(&value),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to load coach plan");
                None
            }
        }
    }

    /// Merge `patch` onto the stored plan (or a default one) and persist it
    ///
    /// # Errors
    ///
    /// Returns an error if the merged plan cannot be written
    pub fn upsert_coach_plan(&self, patch: CoachPlanPatch) -> AppResult<CoachPlan> {
        self.upsert_coach_plan_at(patch, Utc::now())
    }

    /// [`Self::upsert_coach_plan`] with an explicit clock
    ///
    /// # Errors
    ///
    /// Returns an error if the merged plan cannot be written
    pub fn upsert_coach_plan_at(
        &self,
        patch: CoachPlanPatch,
        now: DateTime<Utc>,
    ) -> AppResult<CoachPlan> {
        let current = self.get_coach_plan().unwrap_or_default();
        let merged = merge_plan(current, patch, now);
        self.persist(&merged)?;
        Ok(merged)
    }

    /// Bring the plan onto the local day of `now`, closing the previous day if needed
    ///
    /// Calling this again within the same local day is a no-op that does not
    /// write to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if a seeded or rotated plan cannot be written
    pub fn ensure_current_day(
        &self,
        now: DateTime<Utc>,
        timezone: &str,
    ) -> AppResult<RolloverOutcome> {
        let plan = self.get_coach_plan().unwrap_or_default();
        let timezone = self.resolve_timezone(timezone, &plan);
        let expected_day_id = build_day_id(now, &timezone);

        match day_state(&plan, &expected_day_id) {
            DayState::SameDay => Ok(RolloverOutcome {
                plan,
                rotated: false,
                previous_day_id: None,
            }),
            DayState::Unseeded => {
                let plan = seed_day(plan, &expected_day_id, &timezone, now);
                self.persist(&plan)?;
                debug!(day_id = %expected_day_id, "Seeded plan time");
                Ok(RolloverOutcome {
                    plan,
                    rotated: false,
                    previous_day_id: None,
                })
            }
            DayState::RolloverNeeded { previous_day_id } => {
                let plan = rotate_day(plan, &previous_day_id, &expected_day_id, &timezone, now);
                self.persist(&plan)?;
                info!(
                    previous_day_id = %previous_day_id,
                    day_id = %expected_day_id,
                    "Rotated coach plan day"
                );
                Ok(RolloverOutcome {
                    plan,
                    rotated: true,
                    previous_day_id: Some(previous_day_id),
                })
            }
        }
    }

    /// Record a parsed ledger mutation on its target day
    ///
    /// Today's mutations refresh `signals.today` intake and macros from the
    /// effective ledger. Past-day mutations update that day's snapshot,
    /// creating it when missing and flagging it `autoReopened` when it had
    /// been closed. A `none` mutation returns the stored plan untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation still requires confirmation or the
    /// plan cannot be written
    pub fn apply_food_mutation(
        &self,
        mutation: &ParsedFoodMutation,
        now: DateTime<Utc>,
    ) -> AppResult<CoachPlan> {
        let Some(target) = mutation.target() else {
            return Ok(self.get_coach_plan().unwrap_or_default());
        };
        if target.requires_confirmation {
            return Err(AppError::invalid_input(format!(
                "Mutation for {} requires confirmation",
                target.day_id
            )));
        }

        let mut plan = self.get_coach_plan().unwrap_or_default();
        let stamp = to_iso(now);
        if plan.signals.today.day_id.is_empty() && !target.is_retroactive {
            plan.signals.today.day_id.clone_from(&target.day_id);
        }

        if plan.signals.today.day_id == target.day_id {
            let today = &mut plan.signals.today;
            today.food_entries = merge_food_entries(&today.food_entries, mutation);
            let totals = compute_day_food_totals(&today.food_entries);
            today.kcal_in = totals.kcal;
            today.macros = macros_from_totals(&totals);
            today.updated_at = Some(stamp.clone());
        } else {
            let snapshot = plan
                .history
                .days
                .entry(target.day_id.clone())
                .or_insert_with(|| new_snapshot(target, &stamp));
            snapshot.food_entries = merge_food_entries(&snapshot.food_entries, mutation);
            let totals = compute_day_food_totals(&snapshot.food_entries);
            snapshot.kcal_in = totals.kcal;
            snapshot.macros = macros_from_totals(&totals);
            snapshot.balance = snapshot.kcal_in - snapshot.kcal_out;
            snapshot.updated_at.clone_from(&stamp);
            if snapshot.closed && !snapshot.auto_reopened {
                snapshot.auto_reopened = true;
                info!(day_id = %target.day_id, "Reopened closed day for a retroactive entry");
            }
        }

        plan.metadata.updated_at = Some(stamp);
        self.persist(&plan)?;
        Ok(plan)
    }

    fn resolve_timezone(&self, requested: &str, plan: &CoachPlan) -> String {
        let candidates = [Some(requested), plan.timezone(), Some(self.default_timezone.as_str())];
        candidates
            .into_iter()
            .flatten()
            .find_map(parse_timezone)
            .map_or_else(|| FALLBACK_TIMEZONE.to_owned(), |tz| tz.name().to_owned())
    }

    fn persist(&self, plan: &CoachPlan) -> AppResult<()> {
        let value = serde_json::to_value(plan)?;
        self.storage.save(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, UnavailableStorage};
    use chrono::TimeZone;
    use nutri_core::models::PhysicalProfile;
    use serde_json::json;

    #[test]
    fn test_invalid_timezone_falls_back_to_plan_then_default() {
        let store = CoachPlanStore::new(MemoryStorage::new()).with_default_timezone("Asia/Tokyo");
        let now = Utc.with_ymd_and_hms(2025, 10, 14, 20, 0, 0).unwrap();

        let outcome = store.ensure_current_day(now, "Nowhere/Special").unwrap();
        assert_eq!(outcome.plan.current_day_id(), Some("2025-10-15@Asia/Tokyo"));

        let plan = outcome.plan;
        assert_eq!(
            store.resolve_timezone("bogus", &plan),
            "Asia/Tokyo",
        );
    }

    #[test]
    fn test_unavailable_storage_reads_none_and_write_fails() {
        let store = CoachPlanStore::new(UnavailableStorage);
        assert!(store.get_coach_plan().is_none());
        assert!(store
            .upsert_coach_plan(CoachPlanPatch::physical(PhysicalProfile::default()))
            .is_err());
    }

    #[test]
    fn test_non_object_storage_reads_none() {
        let store = CoachPlanStore::new(MemoryStorage::with_value(json!("corrupt")));
        assert!(store.get_coach_plan().is_none());
    }

    #[test]
    fn test_none_mutation_does_not_write() {
        let store = CoachPlanStore::new(MemoryStorage::new());
        let now = Utc.with_ymd_and_hms(2025, 10, 14, 10, 0, 0).unwrap();
        let plan = store
            .apply_food_mutation(&ParsedFoodMutation::None, now)
            .unwrap();
        assert_eq!(plan, CoachPlan::default());
        assert_eq!(store.storage().write_count(), 0);
    }
}
