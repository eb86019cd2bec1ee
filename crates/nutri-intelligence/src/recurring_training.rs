// ABOUTME: Detects recurring weekly training commitments in messages and weekly routines
// ABOUTME: Produces fixed per-session burn patterns and recognizes per-day cancellations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::LazyLock;

use nutri_core::models::{DayOfWeek, WeeklyRoutineEntry};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classifier::extract_duration_min;
use crate::config::DashboardConfig;
use crate::text::normalize_text;
use crate::training::{detect_activity, estimate_training_kcal, mentions_activity};

const WEEKDAY_ALTERNATION: &str = "lunes|martes|miercoles|jueves|viernes|sabado|domingo";

static RECURRING_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: todos los lunes, cada martes y jueves, todos los lunes, miercoles y viernes
    Regex::new(&format!(
        r"\b(?:todos los|cada)\s+((?:{WEEKDAY_ALTERNATION})(?:\s*(?:,|y)\s*(?:{WEEKDAY_ALTERNATION}))*)\b"
    ))
    .ok()
});

const CANCELLATION_PHRASES: &[&str] = &["hoy no", "no pude", "no fui", "cancel", "me lo salte", "no hubo"];

/// Where a recurring pattern was learned from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSource {
    /// A chat message ("todos los lunes tenis")
    Message,
    /// The plan's weekly routine
    Routine,
}

/// Weekly training commitment with a fixed burn per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTrainingPattern {
    /// Weekdays the session happens on
    pub weekdays: Vec<DayOfWeek>,
    /// Activity name
    pub activity: String,
    /// Session duration (minutes)
    pub duration_min: f64,
    /// Burn per session (kcal)
    pub kcal: f64,
    /// Origin of the pattern
    pub source: PatternSource,
}

impl RecurringTrainingPattern {
    /// Whether the pattern applies on `weekday`
    #[must_use]
    pub fn applies_on(&self, weekday: DayOfWeek) -> bool {
        self.weekdays.contains(&weekday)
    }
}

/// Recurring pattern stated in one message, if any
#[must_use]
pub fn detect_recurring_pattern(
    text: &str,
    body_weight_kg: f64,
    config: &DashboardConfig,
) -> Option<RecurringTrainingPattern> {
    let normalized = normalize_text(text);
    let caps = RECURRING_PATTERN.as_ref()?.captures(&normalized)?;
    let mut weekdays: Vec<DayOfWeek> = caps
        .get(1)?
        .as_str()
        .split(|c: char| !c.is_alphabetic())
        .filter_map(DayOfWeek::parse)
        .collect();
    weekdays.sort();
    weekdays.dedup();
    if weekdays.is_empty() {
        return None;
    }

    let activity = detect_activity(&normalized)?;
    let duration_min = extract_duration_min(&normalized).unwrap_or(config.recurring_session_minutes);
    Some(RecurringTrainingPattern {
        weekdays,
        activity: activity.name.to_owned(),
        duration_min,
        kcal: estimate_training_kcal(activity.met, body_weight_kg, duration_min),
        source: PatternSource::Message,
    })
}

/// Pattern for one weekly routine entry
#[must_use]
pub fn routine_pattern(
    entry: &WeeklyRoutineEntry,
    body_weight_kg: f64,
    config: &DashboardConfig,
) -> RecurringTrainingPattern {
    let duration_min = entry.duration_min.unwrap_or(config.recurring_session_minutes);
    let met = detect_activity(&entry.activity).map_or(config.default_met, |activity| activity.met);
    RecurringTrainingPattern {
        weekdays: vec![entry.weekday],
        activity: entry.activity.clone(),
        duration_min,
        kcal: entry
            .kcal
            .filter(|kcal| *kcal > 0.0)
            .unwrap_or_else(|| estimate_training_kcal(met, body_weight_kg, duration_min)),
        source: PatternSource::Routine,
    }
}

/// Collect patterns from messages (oldest first) and routines
///
/// A later message restating the same activity replaces the earlier pattern.
#[must_use]
pub fn collect_recurring_patterns<'a>(
    texts: impl IntoIterator<Item = &'a str>,
    routines: &[WeeklyRoutineEntry],
    body_weight_kg: f64,
    config: &DashboardConfig,
) -> Vec<RecurringTrainingPattern> {
    let mut patterns: Vec<RecurringTrainingPattern> = Vec::new();
    for text in texts {
        if let Some(pattern) = detect_recurring_pattern(text, body_weight_kg, config) {
            patterns.retain(|existing| existing.activity != pattern.activity);
            patterns.push(pattern);
        }
    }
    patterns.extend(
        routines
            .iter()
            .map(|entry| routine_pattern(entry, body_weight_kg, config)),
    );
    patterns
}

/// Whether a day's concatenated text cancels `activity`
///
/// Both a cancellation phrase and the activity must appear somewhere in the
/// day's text; they need not be in the same sentence.
#[must_use]
pub fn is_cancelled(day_text: &str, activity: &str) -> bool {
    let normalized = normalize_text(day_text);
    CANCELLATION_PHRASES
        .iter()
        .any(|phrase| normalized.contains(phrase))
        && mentions_activity(&normalized, activity)
}
