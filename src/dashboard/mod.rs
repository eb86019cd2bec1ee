// ABOUTME: Dashboard metrics projection over the event log and the coach plan
// ABOUTME: Produces daily, weekly, nutrition, and energy figures for presentation and AI context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Dashboard Metrics
//!
//! A read-only projection. Nothing here writes to storage.
//!
//! ## Pipeline
//!
//! 1. Date user messages in the plan timezone over a 7-day trailing window
//! 2. Classify each message and accumulate heuristic intake, burn, and weight
//! 3. Inject recurring sessions that were neither logged nor cancelled
//! 4. Overlay closed-day snapshots, then the live signals of the active day
//! 5. Complete the physical profile and run the energy model cascade
//!
//! Targets are only reported when there is meaningful data and the energy
//! model has more than a generic default to go on.

/// Seven-day series construction
pub mod series;
/// Profile, energy, and nutrition targets
pub mod targets;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use nutri_core::dates::{parse_timezone, to_iso};
use nutri_core::models::{ChatEvent, CoachPlan, DayOfWeek, PhysicalProfile};
use nutri_intelligence::energy_model::estimate_energy;
use nutri_intelligence::recurring_training::collect_recurring_patterns;
use nutri_intelligence::{
    Confidence, EnergyModel, EventClassifier, IntelligenceConfig, KeywordClassifier,
    RecurringTrainingPattern,
};
use serde::Serialize;
use tracing::debug;

use series::{build_series, user_messages, window_dates, SeriesInputs};
use targets::{
    daily_energy, fill_weight_from_series, has_meaningful_data, nutrition_summary, resolve_profile,
};

/// Weight change below which the trend is reported as stable (kg)
const STABLE_WEIGHT_DELTA_KG: f64 = 0.2;

/// Where a day figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    /// Nothing recorded
    None,
    /// Message heuristics
    Heuristic,
    /// Recurring weekly session
    Recurring,
    /// Closed-day snapshot totals
    Snapshot,
    /// Effective food ledger
    Ledger,
    /// Live running totals of the active day
    Live,
}

/// One day of the trailing window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPoint {
    /// Day id in the window timezone
    pub day_id: String,
    /// Local calendar date
    pub date_iso: String,
    /// Weekday of the date
    pub weekday: DayOfWeek,
    /// Intake (kcal)
    pub kcal_in: f64,
    /// Training burn (kcal)
    pub kcal_out: f64,
    /// Intake minus burn
    pub balance: f64,
    /// Body weight reported that day
    pub weight_kg: Option<f64>,
    /// Meals or effective ledger entries
    pub meals_count: usize,
    /// Activity labels
    pub activities: Vec<String>,
    /// Origin of `kcal_in`
    pub intake_source: SignalSource,
    /// Origin of `kcal_out`
    pub burn_source: SignalSource,
}

/// Today at a glance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Today's day id
    pub day_id: String,
    /// Today's local date
    pub date_iso: String,
    /// Intake (kcal)
    pub kcal_in: f64,
    /// Burn (kcal)
    pub kcal_out: f64,
    /// Intake minus burn
    pub balance: f64,
    /// Latest known body weight
    pub weight_kg: Option<f64>,
    /// Goal-adjusted kcal target
    pub target_kcal: Option<f64>,
    /// Target minus intake
    pub remaining_kcal: Option<f64>,
    /// Basal metabolic rate
    pub basal_kcal: Option<f64>,
    /// Total daily energy expenditure
    pub tdee_kcal: Option<f64>,
    /// Confidence of the target
    pub confidence: Confidence,
    /// Meals logged today
    pub meals_count: usize,
}

/// Direction of the weight trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Losing weight
    Down,
    /// Within the stable band
    Stable,
    /// Gaining weight
    Up,
}

/// First and last weight of the window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightTrend {
    /// Earliest weight in the window
    pub start_kg: f64,
    /// Latest weight in the window
    pub end_kg: f64,
    /// End minus start
    pub change_kg: f64,
    /// Trend direction
    pub direction: TrendDirection,
}

impl WeightTrend {
    /// Trend over points with a weight; needs at least two
    #[must_use]
    pub fn from_points(points: &[DayPoint]) -> Option<Self> {
        let mut weights = points.iter().filter_map(|point| point.weight_kg);
        let start_kg = weights.next()?;
        let end_kg = weights.last()?;
        let change_kg = ((end_kg - start_kg) * 10.0).round() / 10.0;
        let direction = if change_kg.abs() < STABLE_WEIGHT_DELTA_KG {
            TrendDirection::Stable
        } else if change_kg < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Up
        };
        Some(Self {
            start_kg,
            end_kg,
            change_kg,
            direction,
        })
    }
}

/// The trailing week
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    /// Day points, oldest first; the last one is today
    pub days: Vec<DayPoint>,
    /// Sum of intake
    pub total_kcal_in: f64,
    /// Sum of burn
    pub total_kcal_out: f64,
    /// Sum of balance
    pub total_balance: f64,
    /// Mean intake over days with intake
    pub avg_kcal_in: Option<f64>,
    /// Mean burn over days with burn
    pub avg_kcal_out: Option<f64>,
    /// Days with any intake
    pub logged_days: usize,
    /// Days with any burn
    pub training_days: usize,
    /// Weight change across the window
    pub weight_trend: Option<WeightTrend>,
}

impl WeeklySummary {
    fn from_points(days: Vec<DayPoint>) -> Self {
        let total_kcal_in: f64 = days.iter().map(|day| day.kcal_in).sum();
        let total_kcal_out: f64 = days.iter().map(|day| day.kcal_out).sum();
        let logged_days = days.iter().filter(|day| day.kcal_in > 0.0).count();
        let training_days = days.iter().filter(|day| day.kcal_out > 0.0).count();
        let average = |total: f64, count: usize| {
            (count > 0).then(|| (total / count as f64).round())
        };
        Self {
            total_kcal_in,
            total_kcal_out,
            total_balance: total_kcal_in - total_kcal_out,
            avg_kcal_in: average(total_kcal_in, logged_days),
            avg_kcal_out: average(total_kcal_out, training_days),
            logged_days,
            training_days,
            weight_trend: WeightTrend::from_points(&days),
            days,
        }
    }
}

/// Today's macros
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSummary {
    /// Intake (kcal)
    pub kcal: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbohydrates (g)
    pub carbs_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Fiber (g)
    pub fiber_g: Option<f64>,
    /// Effective ledger entries
    pub entries_count: usize,
    /// Daily protein target (g)
    pub protein_target_g: Option<f64>,
    /// Ledger, live totals, or nothing
    pub source: SignalSource,
}

/// Full dashboard projection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Today
    pub daily: DailySummary,
    /// Trailing seven days
    pub weekly: WeeklySummary,
    /// Today's macros
    pub nutrition: NutritionSummary,
    /// Raw energy model output
    pub energy: EnergyModel,
    /// Profile after inference
    pub profile: PhysicalProfile,
    /// Recurring sessions in effect
    pub recurring: Vec<RecurringTrainingPattern>,
    /// Whether anything beyond defaults is known
    pub has_meaningful_data: bool,
    /// Window timezone
    pub timezone: String,
    /// Projection instant
    pub generated_at: String,
}

/// Build the dashboard with the keyword classifier and the global configuration
#[must_use]
pub fn build_dashboard_metrics(
    events: &[ChatEvent],
    plan: &CoachPlan,
    now: DateTime<Utc>,
) -> DashboardMetrics {
    build_dashboard_metrics_with(
        events,
        plan,
        now,
        &KeywordClassifier,
        IntelligenceConfig::global(),
    )
}

/// Build the dashboard with an explicit classifier and configuration
#[must_use]
pub fn build_dashboard_metrics_with(
    events: &[ChatEvent],
    plan: &CoachPlan,
    now: DateTime<Utc>,
    classifier: &dyn EventClassifier,
    config: &IntelligenceConfig,
) -> DashboardMetrics {
    let tz = plan.timezone().and_then(parse_timezone).unwrap_or(Tz::UTC);
    let dates = window_dates(now, tz);
    let messages = user_messages(events, tz);

    let mut profile = resolve_profile(plan, &messages);
    let body_weight_kg = profile
        .weight_kg
        .unwrap_or(config.dashboard.fallback_body_weight_kg);
    let patterns = collect_recurring_patterns(
        messages.iter().map(|message| message.text),
        &plan.routines.weekly,
        body_weight_kg,
        &config.dashboard,
    );

    let inputs = SeriesInputs {
        dates: &dates,
        messages: &messages,
        history: &plan.history,
        live: &plan.signals.today,
        patterns: &patterns,
        body_weight_kg,
        tz,
    };
    let points = build_series(&inputs, classifier, &config.dashboard);
    fill_weight_from_series(&mut profile, &points);

    let meaningful = has_meaningful_data(&profile, &points);
    let energy = estimate_energy(&profile, &config.energy);
    let gated = daily_energy(&energy, plan, &config.energy, meaningful);

    let today = points.last().cloned();
    let today_day_id = today.as_ref().map_or_else(String::new, |point| point.day_id.clone());
    let nutrition = nutrition_summary(plan, &today_day_id, &profile, &config.energy);
    let daily = today.map_or_else(
        || DailySummary {
            day_id: today_day_id,
            date_iso: String::new(),
            kcal_in: 0.0,
            kcal_out: 0.0,
            balance: 0.0,
            weight_kg: profile.weight_kg,
            target_kcal: gated.target_kcal,
            remaining_kcal: gated.target_kcal,
            basal_kcal: gated.basal_kcal,
            tdee_kcal: gated.tdee_kcal,
            confidence: gated.confidence,
            meals_count: 0,
        },
        |point| DailySummary {
            remaining_kcal: gated.target_kcal.map(|target| target - point.kcal_in),
            weight_kg: point.weight_kg.or(profile.weight_kg),
            day_id: point.day_id,
            date_iso: point.date_iso,
            kcal_in: point.kcal_in,
            kcal_out: point.kcal_out,
            balance: point.balance,
            target_kcal: gated.target_kcal,
            basal_kcal: gated.basal_kcal,
            tdee_kcal: gated.tdee_kcal,
            confidence: gated.confidence,
            meals_count: point.meals_count,
        },
    );

    debug!(
        events = events.len(),
        messages = messages.len(),
        recurring = patterns.len(),
        meaningful,
        confidence = ?gated.confidence,
        "Built dashboard metrics"
    );

    DashboardMetrics {
        daily,
        weekly: WeeklySummary::from_points(points),
        nutrition,
        energy,
        profile,
        recurring: patterns,
        has_meaningful_data: meaningful,
        timezone: tz.name().to_owned(),
        generated_at: to_iso(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(weight_kg: Option<f64>) -> DayPoint {
        DayPoint {
            day_id: String::new(),
            date_iso: String::new(),
            weekday: DayOfWeek::Monday,
            kcal_in: 0.0,
            kcal_out: 0.0,
            balance: 0.0,
            weight_kg,
            meals_count: 0,
            activities: Vec::new(),
            intake_source: SignalSource::None,
            burn_source: SignalSource::None,
        }
    }

    #[test]
    fn test_weight_trend_needs_two_weights() {
        assert!(WeightTrend::from_points(&[point(Some(80.0)), point(None)]).is_none());
        let trend =
            WeightTrend::from_points(&[point(Some(80.0)), point(None), point(Some(79.3))]).unwrap();
        assert_eq!(trend.change_kg, -0.7);
        assert_eq!(trend.direction, TrendDirection::Down);
    }

    #[test]
    fn test_weekly_averages_over_logged_days() {
        let mut days = vec![point(None), point(None), point(None)];
        days[0].kcal_in = 2000.0;
        days[2].kcal_in = 1500.0;
        days[2].kcal_out = 300.0;
        let weekly = WeeklySummary::from_points(days);
        assert_eq!(weekly.logged_days, 2);
        assert_eq!(weekly.avg_kcal_in, Some(1750.0));
        assert_eq!(weekly.avg_kcal_out, Some(300.0));
        assert_eq!(weekly.total_balance, 3200.0);
    }
}
