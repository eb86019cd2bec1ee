// ABOUTME: Integration tests for dashboard metrics
// ABOUTME: Exercises the weekly series, energy gating, and nutrition summary end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{memory_store, tuesday_noon, utc, MADRID};
use nutri_coach::chat::build_prompt_context;
use nutri_coach::dashboard::{
    build_dashboard_metrics, build_dashboard_metrics_with, DashboardMetrics, SignalSource,
    TrendDirection,
};
use nutri_core::models::{
    ActivityLevel, ChatEvent, CoachPlan, CoachPlanPatch, DayOfWeek, GoalKind, PhysicalProfile,
    WeeklyRoutineEntry,
};
use nutri_intelligence::{
    parse_food_mutation, Confidence, EnergyMethod, FoodParserPolicy, IntelligenceConfig,
    KeywordClassifier,
};

fn cunningham_plan() -> CoachPlan {
    let mut plan = CoachPlan::default();
    plan.physical_profile = PhysicalProfile {
        weight_kg: Some(70.0),
        body_fat_pct: Some(20.0),
        activity_level: Some(ActivityLevel::Moderate),
        ..PhysicalProfile::default()
    };
    plan
}

fn metrics_for(events: &[ChatEvent], plan: &CoachPlan) -> DashboardMetrics {
    build_dashboard_metrics_with(
        events,
        plan,
        tuesday_noon(),
        &KeywordClassifier,
        &IntelligenceConfig::default(),
    )
}

fn user_text(year: i32, month: u32, day: u32, hour: u32, text: &str) -> ChatEvent {
    ChatEvent::user_text(utc(year, month, day, hour, 0).timestamp_millis(), text)
}

#[test]
fn test_empty_inputs_have_no_target() {
    common::init_test_logging();
    let metrics = build_dashboard_metrics(&[], &CoachPlan::default(), tuesday_noon());

    assert!(!metrics.has_meaningful_data);
    assert_eq!(metrics.timezone, "UTC");
    assert_eq!(metrics.daily.date_iso, "2025-10-14");
    assert_eq!(metrics.daily.target_kcal, None);
    assert_eq!(metrics.daily.remaining_kcal, None);
    assert_eq!(metrics.daily.basal_kcal, None);
    assert_eq!(metrics.daily.confidence, Confidence::None);
    assert_eq!(metrics.energy.method, EnergyMethod::GenericDefault);
    assert_eq!(metrics.weekly.days.len(), 7);
    assert_eq!(metrics.weekly.logged_days, 0);
    assert_eq!(metrics.weekly.avg_kcal_in, None);
    assert!(metrics.weekly.weight_trend.is_none());
    assert_eq!(metrics.nutrition.source, SignalSource::None);
    assert!(metrics.recurring.is_empty());
}

#[test]
fn test_cunningham_profile_drives_target() {
    common::init_test_logging();
    let metrics = metrics_for(&[], &cunningham_plan());

    assert!(metrics.has_meaningful_data);
    assert_eq!(metrics.energy.method, EnergyMethod::Cunningham);
    assert_eq!(metrics.daily.basal_kcal, Some(1732.0));
    assert_eq!(metrics.daily.tdee_kcal, Some(2685.0));
    assert_eq!(metrics.daily.confidence, Confidence::High);
    assert_eq!(metrics.daily.target_kcal, Some(2685.0));
    assert_eq!(metrics.daily.remaining_kcal, Some(2685.0));
    assert_eq!(metrics.nutrition.protein_target_g, Some(112.0));
}

#[test]
fn test_goal_adjusts_target() {
    common::init_test_logging();
    let mut plan = cunningham_plan();
    plan.goals.primary = Some(GoalKind::LoseFat);

    let metrics = metrics_for(&[], &plan);

    assert_eq!(metrics.daily.tdee_kcal, Some(2685.0));
    assert_eq!(metrics.daily.target_kcal, Some(2282.0));
}

#[test]
fn test_week_from_messages_and_routines() {
    common::init_test_logging();
    let mut plan = CoachPlan::default();
    plan.routines.weekly = vec![WeeklyRoutineEntry {
        weekday: DayOfWeek::Monday,
        activity: "tenis".into(),
        duration_min: Some(60.0),
        kcal: Some(500.0),
    }];
    let events = [
        user_text(2025, 10, 8, 9, "peso 80 kg"),
        user_text(2025, 10, 13, 20, "de cena comi pasta"),
        ChatEvent::assistant_text(utc(2025, 10, 13, 20, 1).timestamp_millis(), "peso 90 kg"),
        user_text(2025, 10, 14, 8, "peso 79,3"),
    ];

    let metrics = metrics_for(&events, &plan);
    let days = &metrics.weekly.days;
    assert_eq!(days.first().unwrap().date_iso, "2025-10-08");
    assert_eq!(days.first().unwrap().weight_kg, Some(80.0));

    let monday = &days[5];
    assert_eq!(monday.weekday, DayOfWeek::Monday);
    assert_eq!(monday.kcal_in, 600.0);
    assert_eq!(monday.intake_source, SignalSource::Heuristic);
    assert_eq!(monday.kcal_out, 500.0);
    assert_eq!(monday.burn_source, SignalSource::Recurring);
    assert_eq!(monday.balance, 100.0);
    assert_eq!(monday.activities, vec!["tenis".to_owned()]);

    assert_eq!(metrics.weekly.logged_days, 1);
    assert_eq!(metrics.weekly.training_days, 1);
    assert_eq!(metrics.weekly.avg_kcal_in, Some(600.0));

    let trend = metrics.weekly.weight_trend.unwrap();
    assert_eq!(trend.start_kg, 80.0);
    assert_eq!(trend.end_kg, 79.3);
    assert_eq!(trend.change_kg, -0.7);
    assert_eq!(trend.direction, TrendDirection::Down);

    assert_eq!(metrics.daily.weight_kg, Some(79.3));
    assert!(metrics.has_meaningful_data);
    assert_eq!(metrics.daily.confidence, Confidence::Low);
    assert!(metrics.daily.target_kcal.is_some());
}

#[test]
fn test_ledger_feeds_today_and_nutrition() {
    let store = memory_store();
    let now = tuesday_noon();
    let plan = store.ensure_current_day(now, MADRID).unwrap().plan;
    let mutation = parse_food_mutation(
        "comi 200 g de arroz",
        MADRID,
        plan.current_day_id().unwrap(),
        now,
        &plan.food_entries_by_day(),
        FoodParserPolicy::default(),
    );
    store.apply_food_mutation(&mutation, now).unwrap();
    let plan = store
        .upsert_coach_plan_at(CoachPlanPatch::physical(cunningham_plan().physical_profile), now)
        .unwrap();

    let metrics = metrics_for(&[], &plan);

    assert_eq!(metrics.timezone, MADRID);
    assert_eq!(metrics.daily.day_id, "2025-10-14@Europe/Madrid");
    assert_eq!(metrics.daily.kcal_in, 260.0);
    assert_eq!(metrics.daily.meals_count, 1);
    assert_eq!(metrics.daily.remaining_kcal, Some(2425.0));
    assert_eq!(metrics.nutrition.source, SignalSource::Ledger);
    assert_eq!(metrics.nutrition.kcal, 260.0);
    assert_eq!(metrics.nutrition.entries_count, 1);

    let context = build_prompt_context(&plan, &metrics);
    assert_eq!(context["today"]["kcalIn"], 260.0);
    assert_eq!(context["today"]["targetKcal"], 2685.0);
    assert_eq!(context["energy"]["confidence"], "high");
    assert_eq!(context["hasMeaningfulData"], true);
}
