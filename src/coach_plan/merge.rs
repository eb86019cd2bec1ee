// ABOUTME: Field-level merge of a coach plan patch onto the current plan
// ABOUTME: Label unions capped per day, ledger unions by id, history unions with right precedence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use nutri_core::constants::plan::MAX_TODAY_ITEMS;
use nutri_core::constants::ranges;
use nutri_core::dates::{format_date, parse_day_id, to_iso};
use nutri_core::models::{
    CoachPlan, CoachPlanPatch, CognitiveProfile, CognitiveProfilePatch, DayFoodTotals,
    DaySnapshot, FoodEntry, Goals, History, MacroTotals, PhysicalProfile, PlanTime, Preferences,
    TodaySignals, TodaySignalsPatch,
};
use nutri_core::validation;
use tracing::{debug, warn};

use super::rollover::{rotate_day, seed_day};

/// Union of label lists, most recent last, keeping only the last `cap` unique labels
#[must_use]
pub fn union_labels(existing: &[String], incoming: &[String], cap: usize) -> Vec<String> {
    let mut labels: Vec<String> = existing.to_vec();
    for label in incoming
        .iter()
        .map(String::as_str)
        .filter_map(validation::non_empty)
    {
        labels.retain(|known| !known.eq_ignore_ascii_case(&label));
        labels.push(label);
    }
    if labels.len() > cap {
        labels.drain(..labels.len() - cap);
    }
    labels
}

/// Union of ledger entries by id; entries already present are never replaced
#[must_use]
pub fn union_entries_by_id(existing: &[FoodEntry], incoming: &[FoodEntry]) -> Vec<FoodEntry> {
    let mut entries = existing.to_vec();
    for entry in incoming {
        if !entries.iter().any(|known| known.id == entry.id) {
            entries.push(entry.clone());
        }
    }
    entries
}

/// Macro totals for a day, `None` when nothing was eaten
#[must_use]
pub fn macros_from_totals(totals: &DayFoodTotals) -> Option<MacroTotals> {
    (totals.meals_count > 0).then(|| MacroTotals {
        protein_g: totals.protein_g,
        carbs_g: totals.carbs_g,
        fat_g: totals.fat_g,
        fiber_g: (totals.fiber_g > 0.0).then_some(totals.fiber_g),
    })
}

fn valid_macros(macros: MacroTotals) -> Option<MacroTotals> {
    let grams = [macros.protein_g, macros.carbs_g, macros.fat_g];
    let fiber_ok = macros.fiber_g.is_none_or(|fiber| fiber.is_finite() && fiber >= 0.0);
    (grams.iter().all(|g| g.is_finite() && *g >= 0.0) && fiber_ok).then_some(macros)
}

fn merge_physical(current: &mut PhysicalProfile, patch: PhysicalProfile) {
    if patch.sex.is_some() {
        current.sex = patch.sex;
    }
    if let Some(age) = patch.age_years.and_then(validation::age_years) {
        current.age_years = Some(age);
    }
    if let Some(height) = patch.height_cm.and_then(validation::height_cm) {
        current.height_cm = Some(height);
    }
    if let Some(weight) = patch.weight_kg.and_then(validation::weight_kg) {
        current.weight_kg = Some(weight);
    }
    if let Some(body_fat) = patch.body_fat_pct.and_then(validation::body_fat_pct) {
        current.body_fat_pct = Some(body_fat);
    }
    if patch.activity_level.is_some() {
        current.activity_level = patch.activity_level;
    }
}

fn merge_cognitive(current: &mut CognitiveProfile, patch: CognitiveProfilePatch) {
    if let Some(level) = patch.technical_level {
        current.technical_level = level;
    }
    if let Some(score) = patch.score.and_then(validation::cognitive_score) {
        current.score = score;
    }
    if let Some(tone) = patch.tone_style {
        current.tone_style = tone;
    }
    if let Some(detail) = patch.detail_preference {
        current.detail_preference = detail;
    }
}

fn merge_goals(current: &mut Goals, patch: Goals) {
    if patch.primary.is_some() {
        current.primary = patch.primary;
    }
    if let Some(target) = patch.target_weight_kg.and_then(validation::weight_kg) {
        current.target_weight_kg = Some(target);
    }
    if let Some(sessions) = patch
        .weekly_training_sessions
        .and_then(|sessions| validation::count_in_range(f64::from(sessions), &ranges::WEEKLY_SESSIONS))
    {
        current.weekly_training_sessions = Some(sessions);
    }
    if let Some(notes) = patch.notes.as_deref().and_then(validation::non_empty) {
        current.notes = Some(notes);
    }
}

fn merge_preferences(current: &mut Preferences, patch: Preferences) {
    if let Some(language) = patch.language.as_deref().and_then(validation::non_empty) {
        current.language = Some(language);
    }
    if !patch.dietary_restrictions.is_empty() {
        current.dietary_restrictions = patch.dietary_restrictions;
    }
    if !patch.disliked_foods.is_empty() {
        current.disliked_foods = patch.disliked_foods;
    }
    if let Some(meals) = patch
        .meals_per_day
        .and_then(|meals| validation::count_in_range(f64::from(meals), &ranges::MEALS_PER_DAY))
    {
        current.meals_per_day = Some(meals);
    }
}

fn merge_today(current: &mut TodaySignals, patch: TodaySignalsPatch, now: DateTime<Utc>) {
    if let Some(kcal_in) = patch.kcal_in.and_then(validation::day_kcal) {
        current.kcal_in = kcal_in;
    }
    if let Some(kcal_out) = patch.kcal_out.and_then(validation::day_kcal) {
        current.kcal_out = kcal_out;
    }
    if let Some(macros) = patch.macros.and_then(valid_macros) {
        current.macros = Some(macros);
    }
    if let Some(weight) = patch.weight_kg.and_then(validation::weight_kg) {
        current.weight_kg = Some(weight);
    }
    current.foods = union_labels(&current.foods, &patch.foods, MAX_TODAY_ITEMS);
    current.activities = union_labels(&current.activities, &patch.activities, MAX_TODAY_ITEMS);
    current.food_entries = union_entries_by_id(&current.food_entries, &patch.food_entries);
    current.updated_at = Some(to_iso(now));
}

fn merge_history(current: &mut History, days: impl IntoIterator<Item = (String, DaySnapshot)>) {
    for (day_id, mut snapshot) in days {
        let Some((date, timezone)) = parse_day_id(&day_id) else {
            warn!(day_id = %day_id, "Ignoring history patch with invalid day id");
            continue;
        };
        snapshot.date_iso = format_date(date);
        if snapshot.timezone.is_empty() {
            timezone.clone_into(&mut snapshot.timezone);
        }
        snapshot.balance = snapshot.kcal_in - snapshot.kcal_out;
        snapshot.day_id.clone_from(&day_id);
        current.days.insert(day_id, snapshot);
    }
}

/// Apply a patched time block, keeping `signals.today` on the active day
///
/// Moving `currentDayId` closes the live day into history exactly as a
/// rollover would. A patch with an unparseable day id is ignored.
fn merge_time(current: CoachPlan, mut time: PlanTime, now: DateTime<Utc>) -> CoachPlan {
    let Some((_, day_timezone)) = parse_day_id(&time.current_day_id) else {
        warn!(day_id = %time.current_day_id, "Ignoring time patch with invalid day id");
        return current;
    };
    if time.timezone.is_empty() {
        day_timezone.clone_into(&mut time.timezone);
    }
    let mut plan = match current.current_day_id().map(str::to_owned) {
        Some(previous) if previous != time.current_day_id => {
            debug!(from = %previous, to = %time.current_day_id, "Time patch moves the active day");
            rotate_day(current, &previous, &time.current_day_id, &time.timezone, now)
        }
        Some(_) => current,
        None => seed_day(current, &time.current_day_id, &time.timezone, now),
    };
    if time.last_rotation_iso.is_empty() {
        time.last_rotation_iso = to_iso(now);
    }
    plan.time = Some(time);
    plan
}

/// Merge `patch` onto `current`
///
/// Every section merges field by field; invalid patched values are ignored
/// and leave the current value in place. The schema version never decreases.
#[must_use]
pub fn merge_plan(mut current: CoachPlan, patch: CoachPlanPatch, now: DateTime<Utc>) -> CoachPlan {
    if let Some(time) = patch.time {
        current = merge_time(current, time, now);
    }
    if let Some(profile) = patch.physical_profile {
        merge_physical(&mut current.physical_profile, profile);
    }
    if let Some(cognitive) = patch.cognitive_profile {
        merge_cognitive(&mut current.cognitive_profile, cognitive);
    }
    if let Some(goals) = patch.goals {
        merge_goals(&mut current.goals, goals);
    }
    if let Some(preferences) = patch.preferences {
        merge_preferences(&mut current.preferences, preferences);
    }
    if let Some(routines) = patch.routines {
        current.routines = routines;
    }
    if let Some(weekly_plan) = patch.weekly_plan {
        current.weekly_plan = Some(weekly_plan);
    }
    if let Some(signals) = patch.signals_today {
        merge_today(&mut current.signals.today, signals, now);
    }
    merge_history(&mut current.history, patch.history_days);

    if current.signals.today.day_id.is_empty() {
        if let Some(time) = &current.time {
            current.signals.today.day_id.clone_from(&time.current_day_id);
        }
    }

    let metadata = &mut current.metadata;
    metadata.version = metadata.version.max(patch.version.unwrap_or(0));
    let stamp = to_iso(now);
    if metadata.created_at.is_none() {
        metadata.created_at = Some(stamp.clone());
    }
    metadata.updated_at = Some(stamp);
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nutri_core::models::FoodSource;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 14, 10, 0, 0).unwrap()
    }

    fn entry(id: &str) -> FoodEntry {
        FoodEntry {
            id: id.into(),
            name: "Huevo".into(),
            grams: 60.0,
            kcal: 86.0,
            protein_g: 7.6,
            carbs_g: 0.4,
            fat_g: 5.7,
            fiber_g: None,
            is_estimated: false,
            assumption_note: None,
            source: FoodSource::User,
            linked_entry_id: None,
            catalog_item_id: Some("huevo".into()),
            created_at: "2025-10-14T08:00:00.000Z".into(),
        }
    }

    #[test]
    fn test_physical_profile_merges_field_by_field() {
        let plan = merge_plan(
            CoachPlan::default(),
            CoachPlanPatch::physical(PhysicalProfile {
                weight_kg: Some(80.0),
                ..PhysicalProfile::default()
            }),
            now(),
        );
        let plan = merge_plan(
            plan,
            CoachPlanPatch::physical(PhysicalProfile {
                age_years: Some(30.0),
                weight_kg: Some(900.0),
                ..PhysicalProfile::default()
            }),
            now(),
        );
        assert_eq!(plan.physical_profile.weight_kg, Some(80.0));
        assert_eq!(plan.physical_profile.age_years, Some(30.0));
    }

    #[test]
    fn test_label_union_dedups_and_caps() {
        let existing: Vec<String> = (0..11).map(|i| format!("f{i}")).collect();
        let incoming = vec!["F0".to_owned(), "nuevo".to_owned(), "  ".to_owned()];
        let labels = union_labels(&existing, &incoming, 12);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[labels.len() - 2], "F0");
        assert_eq!(labels.last().map(String::as_str), Some("nuevo"));
        assert!(!labels.contains(&"f0".to_owned()));
    }

    #[test]
    fn test_food_entries_union_by_id() {
        let mut plan = CoachPlan::default();
        plan.signals.today.food_entries = vec![entry("a")];
        let patch = CoachPlanPatch::signals(TodaySignalsPatch {
            food_entries: vec![entry("a"), entry("b")],
            ..TodaySignalsPatch::default()
        });
        let plan = merge_plan(plan, patch, now());
        let ids: Vec<&str> = plan
            .signals
            .today
            .food_entries
            .iter()
            .map(|entry| entry.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_version_never_decreases() {
        let mut plan = CoachPlan::default();
        plan.metadata.version = 5;
        let plan = merge_plan(
            plan,
            CoachPlanPatch {
                version: Some(2),
                ..CoachPlanPatch::default()
            },
            now(),
        );
        assert_eq!(plan.metadata.version, 5);
        assert!(plan.metadata.created_at.is_some());
    }

    #[test]
    fn test_history_right_precedence_recomputes_balance() {
        let mut plan = CoachPlan::default();
        let day_id = "2025-10-13@Europe/Madrid".to_owned();
        plan.history.days.insert(
            day_id.clone(),
            DaySnapshot {
                kcal_in: 1000.0,
                ..DaySnapshot::default()
            },
        );
        let mut patch = CoachPlanPatch::default();
        patch.history_days.insert(
            day_id.clone(),
            DaySnapshot {
                kcal_in: 2000.0,
                kcal_out: 500.0,
                ..DaySnapshot::default()
            },
        );
        patch
            .history_days
            .insert("not-a-day".into(), DaySnapshot::default());
        let plan = merge_plan(plan, patch, now());
        assert_eq!(plan.history.days.len(), 1);
        let day = &plan.history.days[&day_id];
        assert_eq!(day.kcal_in, 2000.0);
        assert_eq!(day.balance, 1500.0);
        assert_eq!(day.timezone, "Europe/Madrid");
        assert_eq!(day.date_iso, "2025-10-13");
    }

    #[test]
    fn test_time_patch_with_invalid_day_id_is_ignored() {
        let mut plan = CoachPlan::default();
        plan.time = Some(PlanTime {
            current_day_id: "2025-10-14@UTC".into(),
            last_rotation_iso: "2025-10-14T00:00:00.000Z".into(),
            timezone: "UTC".into(),
        });
        plan.signals.today.day_id = "2025-10-14@UTC".into();
        let patch = CoachPlanPatch {
            time: Some(PlanTime {
                current_day_id: "mañana".into(),
                last_rotation_iso: String::new(),
                timezone: String::new(),
            }),
            ..CoachPlanPatch::default()
        };
        let plan = merge_plan(plan, patch, now());
        assert_eq!(plan.current_day_id(), Some("2025-10-14@UTC"));
        assert_eq!(plan.signals.today.day_id, "2025-10-14@UTC");
    }
}
