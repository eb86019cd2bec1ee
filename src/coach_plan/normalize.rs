// ABOUTME: Field-by-field normalization of persisted coach plan JSON
// ABOUTME: Small validators returning Option drop invalid fields instead of rejecting the plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan normalization
//!
//! Persisted plans drift: older schema versions, hand edits, partially
//! written blobs. Every nested structure is rebuilt from the raw JSON one
//! field at a time, so a single corrupt field never invalidates the plan.
//! Only a non-object root yields `None`.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use nutri_core::constants::plan::{MAX_TODAY_ITEMS, SCHEMA_VERSION};
use nutri_core::constants::ranges;
use nutri_core::dates::{format_date, parse_date_iso, parse_day_id, parse_iso};
use nutri_core::models::{
    ActivityLevel, CoachPlan, CognitiveProfile, DayOfWeek, DaySnapshot, DetailPreference,
    FoodEntry, FoodSource, GoalKind, Goals, History, MacroTotals, PhysicalProfile, PlanMetadata,
    PlanTime, Preferences, Routines, Sex, Signals, TechnicalLevel, TodaySignals, ToneStyle,
    WeeklyPlan, WeeklyRoutineEntry,
};
use nutri_core::validation;
use serde_json::{Map, Value};
use tracing::{debug, warn};

type Object = Map<String, Value>;

fn number(obj: &Object, key: &str) -> Option<f64> {
    let value = match obj.get(key)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', ".").parse().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

fn validated(obj: &Object, key: &str, validator: impl Fn(f64) -> Option<f64>) -> Option<f64> {
    number(obj, key).and_then(validator)
}

fn non_negative(value: f64) -> Option<f64> {
    (value >= 0.0).then_some(value)
}

fn text(obj: &Object, key: &str) -> Option<String> {
    obj.get(key)?.as_str().and_then(validation::non_empty)
}

fn timestamp(obj: &Object, key: &str) -> Option<String> {
    text(obj, key).filter(|value| parse_iso(value).is_some())
}

fn parsed<T>(obj: &Object, key: &str, parser: impl Fn(&str) -> Option<T>) -> Option<T> {
    obj.get(key)?.as_str().and_then(parser)
}

fn flag(obj: &Object, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn count(obj: &Object, key: &str, range: &RangeInclusive<f64>) -> Option<u32> {
    number(obj, key).and_then(|value| validation::count_in_range(value, range))
}

fn items<'a>(obj: &'a Object, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice)
}

/// Unique non-empty strings, keeping the last occurrence of each
fn string_list(obj: &Object, key: &str) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for label in items(obj, key)
        .iter()
        .filter_map(Value::as_str)
        .filter_map(validation::non_empty)
    {
        labels.retain(|existing| !existing.eq_ignore_ascii_case(&label));
        labels.push(label);
    }
    labels
}

fn capped(mut labels: Vec<String>) -> Vec<String> {
    if labels.len() > MAX_TODAY_ITEMS {
        labels.drain(..labels.len() - MAX_TODAY_ITEMS);
    }
    labels
}

fn section<T: Default>(root: &Object, key: &str, normalize: impl Fn(&Object) -> T) -> T {
    root.get(key)
        .and_then(Value::as_object)
        .map_or_else(T::default, normalize)
}

fn normalize_time(obj: &Object) -> Option<PlanTime> {
    let current_day_id = text(obj, "current_day_id")?;
    let (_, day_timezone) = parse_day_id(&current_day_id)?;
    let timezone = text(obj, "timezone").unwrap_or_else(|| day_timezone.to_owned());
    Some(PlanTime {
        last_rotation_iso: timestamp(obj, "last_rotation_iso").unwrap_or_default(),
        timezone,
        current_day_id,
    })
}

fn normalize_physical_profile(obj: &Object) -> PhysicalProfile {
    PhysicalProfile {
        sex: parsed(obj, "sex", Sex::parse),
        age_years: validated(obj, "ageYears", validation::age_years),
        height_cm: validated(obj, "heightCm", validation::height_cm),
        weight_kg: validated(obj, "weightKg", validation::weight_kg),
        body_fat_pct: validated(obj, "bodyFatPct", validation::body_fat_pct),
        activity_level: parsed(obj, "activityLevel", ActivityLevel::parse),
    }
}

fn normalize_cognitive_profile(obj: &Object) -> CognitiveProfile {
    let defaults = CognitiveProfile::default();
    CognitiveProfile {
        technical_level: parsed(obj, "technicalLevel", TechnicalLevel::parse)
            .unwrap_or(defaults.technical_level),
        score: validated(obj, "score", validation::cognitive_score).unwrap_or(defaults.score),
        tone_style: parsed(obj, "toneStyle", ToneStyle::parse).unwrap_or(defaults.tone_style),
        detail_preference: parsed(obj, "detailPreference", DetailPreference::parse)
            .unwrap_or(defaults.detail_preference),
    }
}

fn normalize_goals(obj: &Object) -> Goals {
    Goals {
        primary: parsed(obj, "primary", GoalKind::parse),
        target_weight_kg: validated(obj, "targetWeightKg", validation::weight_kg),
        weekly_training_sessions: count(obj, "weeklyTrainingSessions", &ranges::WEEKLY_SESSIONS),
        notes: text(obj, "notes"),
    }
}

fn normalize_preferences(obj: &Object) -> Preferences {
    Preferences {
        language: text(obj, "language"),
        dietary_restrictions: string_list(obj, "dietaryRestrictions"),
        disliked_foods: string_list(obj, "dislikedFoods"),
        meals_per_day: count(obj, "mealsPerDay", &ranges::MEALS_PER_DAY),
    }
}

fn normalize_routine_entry(value: &Value) -> Option<WeeklyRoutineEntry> {
    let obj = value.as_object()?;
    Some(WeeklyRoutineEntry {
        weekday: parsed(obj, "weekday", DayOfWeek::parse)?,
        activity: text(obj, "activity")?,
        duration_min: validated(obj, "durationMin", validation::session_minutes),
        kcal: validated(obj, "kcal", validation::day_kcal).filter(|kcal| *kcal > 0.0),
    })
}

fn normalize_routines(obj: &Object) -> Routines {
    Routines {
        weekly: items(obj, "weekly")
            .iter()
            .filter_map(normalize_routine_entry)
            .collect(),
    }
}

fn normalize_weekly_plan(obj: &Object) -> Option<WeeklyPlan> {
    let week_start = text(obj, "weekStartIso")
        .or_else(|| text(obj, "weekStartISO"))
        .filter(|value| parse_date_iso(value).is_some())?;
    let generated_at = timestamp(obj, "generatedAtIso").or_else(|| timestamp(obj, "generatedAtISO"))?;
    Some(WeeklyPlan {
        text: text(obj, "text")?,
        week_start_iso: week_start,
        generated_at_iso: generated_at,
    })
}

fn normalize_macros(value: &Value) -> Option<MacroTotals> {
    let obj = value.as_object()?;
    let grams = |key: &str| validated(obj, key, non_negative);
    let (protein, carbs, fat) = (grams("proteinG"), grams("carbsG"), grams("fatG"));
    if protein.is_none() && carbs.is_none() && fat.is_none() {
        return None;
    }
    Some(MacroTotals {
        protein_g: protein.unwrap_or(0.0),
        carbs_g: carbs.unwrap_or(0.0),
        fat_g: fat.unwrap_or(0.0),
        fiber_g: grams("fiberG"),
    })
}

fn normalize_micros(value: &Value) -> Option<BTreeMap<String, f64>> {
    let micros: BTreeMap<String, f64> = value
        .as_object()?
        .iter()
        .filter_map(|(name, amount)| {
            let amount = amount.as_f64().filter(|v| v.is_finite()).and_then(non_negative)?;
            Some((validation::non_empty(name)?, amount))
        })
        .collect();
    (!micros.is_empty()).then_some(micros)
}

fn normalize_food_entry(value: &Value) -> Option<FoodEntry> {
    let obj = value.as_object()?;
    let id = text(obj, "id")?;
    let linked_entry_id = text(obj, "linkedEntryId").filter(|linked| *linked != id);
    Some(FoodEntry {
        name: text(obj, "name")?,
        grams: validated(obj, "grams", |v| validation::in_range(v, &ranges::ENTRY_GRAMS))?,
        kcal: validated(obj, "kcal", non_negative)?,
        protein_g: validated(obj, "proteinG", non_negative).unwrap_or(0.0),
        carbs_g: validated(obj, "carbsG", non_negative).unwrap_or(0.0),
        fat_g: validated(obj, "fatG", non_negative).unwrap_or(0.0),
        fiber_g: validated(obj, "fiberG", non_negative),
        is_estimated: flag(obj, "isEstimated"),
        assumption_note: text(obj, "assumptionNote"),
        source: parsed(obj, "source", FoodSource::parse)?,
        linked_entry_id,
        catalog_item_id: text(obj, "catalogItemId"),
        created_at: timestamp(obj, "createdAt")?,
        id,
    })
}

/// Well-formed ledger entries under `key`, first occurrence of each id wins
fn food_entries(obj: &Object, key: &str) -> Vec<FoodEntry> {
    let raw = items(obj, key);
    let mut entries: Vec<FoodEntry> = Vec::with_capacity(raw.len());
    for entry in raw.iter().filter_map(normalize_food_entry) {
        if !entries.iter().any(|existing| existing.id == entry.id) {
            entries.push(entry);
        }
    }
    let dropped = raw.len() - entries.len();
    if dropped > 0 {
        debug!(dropped, "Dropped malformed or duplicate food entries");
    }
    entries
}

fn normalize_today(obj: &Object) -> TodaySignals {
    TodaySignals {
        day_id: text(obj, "dayId")
            .filter(|day_id| parse_day_id(day_id).is_some())
            .unwrap_or_default(),
        kcal_in: validated(obj, "kcalIn", validation::day_kcal).unwrap_or(0.0),
        kcal_out: validated(obj, "kcalOut", validation::day_kcal).unwrap_or(0.0),
        macros: obj.get("macros").and_then(normalize_macros),
        weight_kg: validated(obj, "weightKg", validation::weight_kg),
        foods: capped(string_list(obj, "foods")),
        activities: capped(string_list(obj, "activities")),
        food_entries: food_entries(obj, "foodEntries"),
        updated_at: timestamp(obj, "updatedAt"),
    }
}

fn normalize_signals(obj: &Object) -> Signals {
    Signals {
        today: section(obj, "today", normalize_today),
    }
}

fn normalize_snapshot(day_id: &str, value: &Value) -> Option<DaySnapshot> {
    let obj = value.as_object()?;
    let (date, day_timezone) = parse_day_id(day_id)?;
    let kcal_in = validated(obj, "kcalIn", validation::day_kcal).unwrap_or(0.0);
    let kcal_out = validated(obj, "kcalOut", validation::day_kcal).unwrap_or(0.0);
    Some(DaySnapshot {
        day_id: day_id.to_owned(),
        date_iso: format_date(date),
        timezone: text(obj, "timezone").unwrap_or_else(|| day_timezone.to_owned()),
        kcal_in,
        kcal_out,
        balance: kcal_in - kcal_out,
        macros: obj.get("macros").and_then(normalize_macros),
        micros: obj.get("micros").and_then(normalize_micros),
        weight_kg: validated(obj, "weightKg", validation::weight_kg),
        food_entries: food_entries(obj, "foodEntries"),
        foods: string_list(obj, "foods"),
        activities: string_list(obj, "activities"),
        closed: flag(obj, "closed"),
        auto_reopened: flag(obj, "autoReopened"),
        created_at: timestamp(obj, "createdAt").unwrap_or_default(),
        updated_at: timestamp(obj, "updatedAt").unwrap_or_default(),
    })
}

fn normalize_history(obj: &Object) -> History {
    let Some(raw_days) = obj.get("days").and_then(Value::as_object) else {
        return History::default();
    };
    let days: BTreeMap<String, DaySnapshot> = raw_days
        .iter()
        .filter_map(|(day_id, value)| {
            let snapshot = normalize_snapshot(day_id, value);
            if snapshot.is_none() {
                warn!(day_id = %day_id, "Dropping malformed history day");
            }
            snapshot.map(|snapshot| (day_id.clone(), snapshot))
        })
        .collect();
    History { days }
}

fn normalize_metadata(obj: &Object) -> PlanMetadata {
    PlanMetadata {
        version: obj
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|version| u32::try_from(version).ok())
            .unwrap_or(SCHEMA_VERSION),
        created_at: timestamp(obj, "createdAt"),
        updated_at: timestamp(obj, "updatedAt"),
    }
}

/// Rebuild a plan from raw persisted JSON
///
/// Returns `None` only when `value` is not a JSON object.
#[must_use]
pub fn normalize_plan(value: &Value) -> Option<CoachPlan> {
    let Some(root) = value.as_object() else {
        warn!("Persisted coach plan is not an object");
        return None;
    };

    let mut plan = CoachPlan {
        time: root
            .get("time")
            .and_then(Value::as_object)
            .and_then(normalize_time),
        physical_profile: section(root, "physicalProfile", normalize_physical_profile),
        cognitive_profile: section(root, "cognitiveProfile", normalize_cognitive_profile),
        goals: section(root, "goals", normalize_goals),
        preferences: section(root, "preferences", normalize_preferences),
        routines: section(root, "routines", normalize_routines),
        weekly_plan: root
            .get("weeklyPlan")
            .and_then(Value::as_object)
            .and_then(normalize_weekly_plan),
        signals: section(root, "signals", normalize_signals),
        history: section(root, "history", normalize_history),
        metadata: section(root, "metadata", normalize_metadata),
    };

    if plan.signals.today.day_id.is_empty() {
        if let Some(current_day_id) = plan.time.as_ref().map(|time| time.current_day_id.clone()) {
            plan.signals.today.day_id = current_day_id;
        }
    }
    Some(plan)
}
