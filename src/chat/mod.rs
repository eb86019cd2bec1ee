// ABOUTME: Chat logic orchestrating rollover, food parsing, ledger writes, and signal labels per message
// ABOUTME: Returns an ingest outcome the caller turns into a prompt context or a deterministic reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Chat Logic
//!
//! One user message flows through:
//!
//! 1. [`CoachPlanStore::ensure_current_day`] so writes land on the right day
//! 2. [`parse_food_mutation`] against the entries already recorded per day
//! 3. [`CoachPlanStore::apply_food_mutation`], unless the target day needs
//!    confirmation, in which case the mutation is returned pending
//! 4. A signals patch with food and activity labels, training burn, and weight

/// Prompt context for the language model
pub mod context;
/// Deterministic Spanish replies
pub mod reply;

pub use context::build_prompt_context;
pub use reply::fallback_reply;

use chrono::{DateTime, Utc};
use nutri_core::models::{CoachPlan, CoachPlanPatch, TodaySignalsPatch};
use nutri_intelligence::classifier::extract_weight_kg;
use nutri_intelligence::food_catalog::find_catalog_item_by_text;
use nutri_intelligence::food_parser::is_correction;
use nutri_intelligence::text::normalize_text;
use nutri_intelligence::{
    parse_food_mutation, EventCategory, EventClassifier, FoodParserPolicy, IntelligenceConfig,
    KeywordClassifier, ParsedFoodMutation,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::coach_plan::CoachPlanStore;
use crate::dashboard::series::training_session;
use crate::errors::AppResult;
use crate::storage::PlanStorage;

/// What happened to the food mutation of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationStatus {
    /// Written to the ledger
    Applied,
    /// Waiting for the user to confirm the target day
    PendingConfirmation,
    /// A correction with no earlier entry to correct
    NothingToCorrect,
    /// No food mutation in the message
    NoMutation,
}

/// Result of ingesting one user message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOutcome {
    /// Whether the message triggered a day rollover
    pub rotated: bool,
    /// Day closed by the rollover
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_day_id: Option<String>,
    /// Parsed ledger mutation
    pub mutation: ParsedFoodMutation,
    /// Fate of the mutation
    pub status: MutationStatus,
    /// Message category
    pub category: EventCategory,
    /// Plan after the message
    pub plan: CoachPlan,
}

/// Labels, burn, and weight the message adds to the active day
fn signals_patch(
    text: &str,
    category: EventCategory,
    applied_today: Option<&str>,
    plan: &CoachPlan,
    config: &IntelligenceConfig,
) -> Option<TodaySignalsPatch> {
    let today = &plan.signals.today;
    let mut patch = TodaySignalsPatch::default();
    if let Some(food) = applied_today {
        patch.foods.push(food.to_owned());
    }
    match category {
        EventCategory::Training => {
            let body_weight_kg = plan
                .physical_profile
                .weight_kg
                .or(today.weight_kg)
                .unwrap_or(config.dashboard.fallback_body_weight_kg);
            if let Some(session) = training_session(text, body_weight_kg, &config.dashboard) {
                patch.kcal_out = Some(today.kcal_out + session.kcal);
                if let Some(activity) = session.activity {
                    patch.activities.push(activity.name.to_owned());
                }
            }
        }
        EventCategory::Weight => patch.weight_kg = extract_weight_kg(text),
        EventCategory::Food | EventCategory::Other => {}
    }
    let is_empty = patch.foods.is_empty()
        && patch.activities.is_empty()
        && patch.kcal_out.is_none()
        && patch.weight_kg.is_none();
    (!is_empty).then_some(patch)
}

fn record_signals<S: PlanStorage>(
    store: &CoachPlanStore<S>,
    plan: CoachPlan,
    patch: Option<TodaySignalsPatch>,
    now: DateTime<Utc>,
) -> AppResult<CoachPlan> {
    match patch {
        Some(patch) => store.upsert_coach_plan_at(CoachPlanPatch::signals(patch), now),
        None => Ok(plan),
    }
}

/// Food name to label on the active day when the mutation landed there
fn food_label_for_today<'a>(mutation: &'a ParsedFoodMutation, plan: &CoachPlan) -> Option<&'a str> {
    let target = mutation.target()?;
    let entry = mutation.entry()?;
    (plan.current_day_id() == Some(target.day_id.as_str())).then_some(entry.name.as_str())
}

/// Process one user message against the stored plan
///
/// # Errors
///
/// Returns an error if the rollover, the ledger write, or the signals update
/// cannot be persisted
pub fn ingest_user_message<S: PlanStorage>(
    store: &CoachPlanStore<S>,
    text: &str,
    now: DateTime<Utc>,
    timezone: &str,
    policy: FoodParserPolicy,
) -> AppResult<IngestOutcome> {
    let rollover = store.ensure_current_day(now, timezone)?;
    let plan = rollover.plan;
    let current_day_id = plan.current_day_id().unwrap_or_default().to_owned();
    let plan_timezone = plan.timezone().unwrap_or(timezone).to_owned();

    let mutation = parse_food_mutation(
        text,
        &plan_timezone,
        &current_day_id,
        now,
        &plan.food_entries_by_day(),
        policy,
    );
    let category = KeywordClassifier.classify(text);

    let (status, plan) = match mutation.target() {
        None => {
            let normalized = normalize_text(text);
            let status = if is_correction(&normalized)
                && find_catalog_item_by_text(&normalized).is_some()
            {
                MutationStatus::NothingToCorrect
            } else {
                MutationStatus::NoMutation
            };
            (status, plan)
        }
        Some(target) if target.requires_confirmation => {
            debug!(day_id = %target.day_id, "Food mutation pending confirmation");
            (MutationStatus::PendingConfirmation, plan)
        }
        Some(_) => (
            MutationStatus::Applied,
            store.apply_food_mutation(&mutation, now)?,
        ),
    };

    let applied_today = if status == MutationStatus::Applied {
        food_label_for_today(&mutation, &plan)
    } else {
        None
    };
    let patch = signals_patch(
        text,
        category,
        applied_today,
        &plan,
        IntelligenceConfig::global(),
    );
    let plan = record_signals(store, plan, patch, now)?;

    info!(
        status = ?status,
        category = ?category,
        rotated = rollover.rotated,
        "Ingested user message"
    );
    Ok(IngestOutcome {
        rotated: rollover.rotated,
        previous_day_id: rollover.previous_day_id,
        mutation,
        status,
        category,
        plan,
    })
}

/// Apply a mutation the user confirmed after it was returned pending
///
/// # Errors
///
/// Returns an error if the plan cannot be persisted
pub fn confirm_food_mutation<S: PlanStorage>(
    store: &CoachPlanStore<S>,
    mutation: ParsedFoodMutation,
    now: DateTime<Utc>,
) -> AppResult<CoachPlan> {
    let mutation = mutation.confirmed();
    let plan = store.apply_food_mutation(&mutation, now)?;
    let patch = food_label_for_today(&mutation, &plan).map(|food| TodaySignalsPatch {
        foods: vec![food.to_owned()],
        ..TodaySignalsPatch::default()
    });
    record_signals(store, plan, patch, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;

    #[test]
    fn test_training_patch_accumulates_burn() {
        let mut plan = CoachPlan::default();
        plan.physical_profile.weight_kg = Some(70.0);
        plan.signals.today.kcal_out = 100.0;
        let patch = signals_patch(
            "sali a correr 30 min",
            EventCategory::Training,
            None,
            &plan,
            &IntelligenceConfig::default(),
        )
        .unwrap();
        // 9.8 MET x 70 kg x 0.5 h = 343
        assert_eq!(patch.kcal_out, Some(443.0));
        assert_eq!(patch.activities, ["correr"]);
    }

    #[test]
    fn test_other_message_has_no_patch() {
        let patch = signals_patch(
            "hola que tal",
            EventCategory::Other,
            None,
            &CoachPlan::default(),
            &IntelligenceConfig::default(),
        );
        assert!(patch.is_none());
    }

    #[test]
    fn test_food_label_only_for_active_day() {
        let store = CoachPlanStore::new(MemoryStorage::new());
        let now = Utc.with_ymd_and_hms(2025, 10, 14, 10, 0, 0).unwrap();
        let plan = store.ensure_current_day(now, "UTC").unwrap().plan;
        let mutation = parse_food_mutation(
            "ayer comi pollo",
            "UTC",
            "2025-10-14@UTC",
            now,
            &plan.food_entries_by_day(),
            FoodParserPolicy::default(),
        );
        assert!(food_label_for_today(&mutation, &plan).is_none());
    }
}
