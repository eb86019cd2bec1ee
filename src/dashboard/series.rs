// ABOUTME: Seven-day series construction for the dashboard projection
// ABOUTME: Buckets user messages by local day, then layers recurring burn, snapshots, and live signals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use nutri_core::constants::dashboard::WINDOW_DAYS;
use nutri_core::dates::{day_id_for_date, days_before, format_date, parse_date_iso, parse_day_id};
use nutri_core::models::{ChatEvent, DayOfWeek, DaySnapshot, History, TodaySignals};
use nutri_intelligence::classifier::{
    detect_meal_type, extract_duration_min, extract_kcal, extract_weight_kg,
};
use nutri_intelligence::config::DashboardConfig;
use nutri_intelligence::recurring_training::is_cancelled;
use nutri_intelligence::training::{
    detect_activity, estimate_training_kcal, mentions_activity, TrainingActivity,
};
use nutri_intelligence::{
    compute_day_food_totals, EventCategory, EventClassifier, RecurringTrainingPattern,
};
use tracing::debug;

use super::{DayPoint, SignalSource};

/// User message placed on its local calendar day
#[derive(Debug, Clone, Copy)]
pub struct DayMessage<'a> {
    /// Local date of the message
    pub date: NaiveDate,
    /// Text projection
    pub text: &'a str,
}

/// User messages with text, ordered oldest first, dated in `tz`
#[must_use]
pub fn user_messages(events: &[ChatEvent], tz: Tz) -> Vec<DayMessage<'_>> {
    let mut dated: Vec<(i64, DayMessage<'_>)> = events
        .iter()
        .filter(|event| event.is_user())
        .filter_map(|event| {
            let text = event.text_projection()?;
            let date = event.timestamp()?.with_timezone(&tz).date_naive();
            Some((event.ts, DayMessage { date, text }))
        })
        .collect();
    dated.sort_by_key(|(ts, _)| *ts);
    dated.into_iter().map(|(_, message)| message).collect()
}

/// Local dates of the window, oldest first, ending on the local date of `now`
#[must_use]
pub fn window_dates(now: DateTime<Utc>, tz: Tz) -> Vec<NaiveDate> {
    let today = now.with_timezone(&tz).date_naive();
    (0..WINDOW_DAYS as u64)
        .rev()
        .map(|offset| days_before(today, offset))
        .collect()
}

fn empty_point(date: NaiveDate, tz: Tz) -> DayPoint {
    DayPoint {
        day_id: day_id_for_date(date, tz.name()),
        date_iso: format_date(date),
        weekday: DayOfWeek::from(date.weekday()),
        kcal_in: 0.0,
        kcal_out: 0.0,
        balance: 0.0,
        weight_kg: None,
        meals_count: 0,
        activities: Vec::new(),
        intake_source: SignalSource::None,
        burn_source: SignalSource::None,
    }
}

fn push_label(labels: &mut Vec<String>, label: &str) {
    if !labels.iter().any(|existing| existing.eq_ignore_ascii_case(label)) {
        labels.push(label.to_owned());
    }
}

/// Training session described by a message
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSession {
    /// Recognized activity, if any
    pub activity: Option<TrainingActivity>,
    /// Burn (kcal)
    pub kcal: f64,
}

/// Burn of the session a training message reports
///
/// Explicit kcal wins; otherwise MET x body weight x duration, with the
/// configured defaults for unknown activities and missing durations.
/// Returns `None` when the message cancels the session.
#[must_use]
pub fn training_session(
    text: &str,
    body_weight_kg: f64,
    config: &DashboardConfig,
) -> Option<TrainingSession> {
    let activity = detect_activity(text);
    if activity.is_some_and(|found| is_cancelled(text, found.name)) {
        return None;
    }
    let kcal = extract_kcal(text).unwrap_or_else(|| {
        let met = activity.map_or(config.default_met, |found| found.met);
        let minutes = extract_duration_min(text).unwrap_or(config.default_training_minutes);
        estimate_training_kcal(met, body_weight_kg, minutes)
    });
    Some(TrainingSession { activity, kcal })
}

/// Fold one classified message into its day
fn accumulate_message(
    point: &mut DayPoint,
    text: &str,
    category: EventCategory,
    body_weight_kg: f64,
    config: &DashboardConfig,
) {
    match category {
        EventCategory::Food => {
            let kcal = extract_kcal(text)
                .unwrap_or_else(|| detect_meal_type(text).default_kcal(&config.meal_defaults));
            point.kcal_in += kcal;
            point.meals_count += 1;
            point.intake_source = SignalSource::Heuristic;
        }
        EventCategory::Training => {
            let Some(session) = training_session(text, body_weight_kg, config) else {
                return;
            };
            point.kcal_out += session.kcal;
            point.burn_source = SignalSource::Heuristic;
            if let Some(found) = session.activity {
                push_label(&mut point.activities, found.name);
            }
        }
        EventCategory::Weight => {
            point.weight_kg = extract_weight_kg(text).or(point.weight_kg);
        }
        EventCategory::Other => {}
    }
}

/// Inject recurring sessions that were neither logged nor cancelled
fn apply_recurring(point: &mut DayPoint, day_text: &str, patterns: &[RecurringTrainingPattern]) {
    for pattern in patterns.iter().filter(|pattern| pattern.applies_on(point.weekday)) {
        let logged = point
            .activities
            .iter()
            .any(|label| mentions_activity(label, &pattern.activity));
        if logged {
            continue;
        }
        if is_cancelled(day_text, &pattern.activity) {
            debug!(day = %point.date_iso, activity = %pattern.activity, "Recurring session cancelled");
            continue;
        }
        point.kcal_out += pattern.kcal;
        if point.burn_source == SignalSource::None {
            point.burn_source = SignalSource::Recurring;
        }
        push_label(&mut point.activities, &pattern.activity);
    }
}

/// Replace heuristics with what the closed day recorded
fn overlay_snapshot(point: &mut DayPoint, snapshot: &DaySnapshot) {
    if snapshot.food_entries.is_empty() {
        if snapshot.kcal_in > 0.0 {
            point.kcal_in = snapshot.kcal_in;
            point.intake_source = SignalSource::Snapshot;
        }
    } else {
        let totals = compute_day_food_totals(&snapshot.food_entries);
        point.kcal_in = totals.kcal;
        point.meals_count = totals.meals_count;
        point.intake_source = SignalSource::Ledger;
    }
    if snapshot.kcal_out > 0.0 {
        point.kcal_out = snapshot.kcal_out;
        point.burn_source = SignalSource::Snapshot;
    }
    point.weight_kg = snapshot.weight_kg.or(point.weight_kg);
    for activity in &snapshot.activities {
        push_label(&mut point.activities, activity);
    }
}

/// Max-merge the live running totals into their day
fn overlay_live(point: &mut DayPoint, live: &TodaySignals) {
    let ledger = compute_day_food_totals(&live.food_entries);
    let live_in = live.kcal_in.max(ledger.kcal);
    if live_in > point.kcal_in {
        point.kcal_in = live_in;
        point.intake_source = if ledger.meals_count > 0 && ledger.kcal >= live.kcal_in {
            SignalSource::Ledger
        } else {
            SignalSource::Live
        };
    }
    point.meals_count = point.meals_count.max(ledger.meals_count);
    if live.kcal_out > point.kcal_out {
        point.kcal_out = live.kcal_out;
        point.burn_source = SignalSource::Live;
    }
    point.weight_kg = live.weight_kg.or(point.weight_kg);
    for activity in &live.activities {
        push_label(&mut point.activities, activity);
    }
}

/// Snapshots by local date, preferring the ones recorded in `tz`
fn snapshots_by_date(history: &History, tz: Tz) -> BTreeMap<NaiveDate, &DaySnapshot> {
    let mut by_date: BTreeMap<NaiveDate, &DaySnapshot> = BTreeMap::new();
    for (day_id, snapshot) in &history.days {
        let date = parse_day_id(day_id)
            .map(|(date, _)| date)
            .or_else(|| parse_date_iso(&snapshot.date_iso));
        let Some(date) = date else { continue };
        let exact = snapshot.timezone == tz.name();
        by_date
            .entry(date)
            .and_modify(|current| {
                if exact {
                    *current = snapshot;
                }
            })
            .or_insert(snapshot);
    }
    by_date
}

/// Inputs shared by every day of the series
pub struct SeriesInputs<'a> {
    /// Window dates, oldest first
    pub dates: &'a [NaiveDate],
    /// Dated user messages, oldest first
    pub messages: &'a [DayMessage<'a>],
    /// Closed days
    pub history: &'a History,
    /// Live signals
    pub live: &'a TodaySignals,
    /// Detected recurring sessions
    pub patterns: &'a [RecurringTrainingPattern],
    /// Body weight used for MET burn
    pub body_weight_kg: f64,
    /// Window timezone
    pub tz: Tz,
}

/// Build the day points of the window, oldest first
#[must_use]
pub fn build_series(
    inputs: &SeriesInputs<'_>,
    classifier: &dyn EventClassifier,
    config: &DashboardConfig,
) -> Vec<DayPoint> {
    let snapshots = snapshots_by_date(inputs.history, inputs.tz);
    let live_date = parse_day_id(&inputs.live.day_id).map(|(date, _)| date);

    inputs
        .dates
        .iter()
        .map(|&date| {
            let mut point = empty_point(date, inputs.tz);
            let day_messages: Vec<&str> = inputs
                .messages
                .iter()
                .filter(|message| message.date == date)
                .map(|message| message.text)
                .collect();
            for text in &day_messages {
                let category = classifier.classify(text);
                accumulate_message(&mut point, text, category, inputs.body_weight_kg, config);
            }
            apply_recurring(&mut point, &day_messages.join("\n"), inputs.patterns);
            if let Some(snapshot) = snapshots.get(&date) {
                overlay_snapshot(&mut point, snapshot);
            }
            if live_date == Some(date) {
                overlay_live(&mut point, inputs.live);
            }
            point.kcal_in = point.kcal_in.round();
            point.kcal_out = point.kcal_out.round();
            point.balance = point.kcal_in - point.kcal_out;
            point
        })
        .collect()
}
