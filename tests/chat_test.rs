// ABOUTME: Integration tests for chat message ingestion
// ABOUTME: Runs Spanish user messages through rollover, the food ledger, signals, and replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{memory_store, tuesday_noon, utc, MADRID};
use nutri_coach::chat::{
    confirm_food_mutation, fallback_reply, ingest_user_message, MutationStatus,
};
use nutri_coach::dashboard::build_dashboard_metrics;
use nutri_core::models::{CoachPlanPatch, FoodSource, PhysicalProfile};
use nutri_intelligence::{EventCategory, FoodParserPolicy, ParsedFoodMutation};

const MONDAY: &str = "2025-10-13@Europe/Madrid";
const TUESDAY: &str = "2025-10-14@Europe/Madrid";

#[test]
fn test_counted_food_is_recorded_today() {
    let store = memory_store();
    let now = tuesday_noon();

    let outcome =
        ingest_user_message(&store, "comi 2 huevos", now, MADRID, FoodParserPolicy::default())
            .unwrap();

    assert_eq!(outcome.status, MutationStatus::Applied);
    assert_eq!(outcome.category, EventCategory::Food);
    let ParsedFoodMutation::Add { target, entry } = &outcome.mutation else {
        panic!("expected an addition, got {:?}", outcome.mutation);
    };
    assert_eq!(target.day_id, TUESDAY);
    assert!(!target.is_retroactive);
    assert_eq!(entry.grams, 120.0);
    assert_eq!(entry.kcal, 172.0);
    assert_eq!(entry.source, FoodSource::User);
    assert!(!entry.is_estimated);

    let today = &outcome.plan.signals.today;
    assert_eq!(today.kcal_in, 172.0);
    assert_eq!(today.foods, vec!["Huevo".to_owned()]);
    let stored = store.get_coach_plan().unwrap();
    assert_eq!(stored.signals.today.food_entries.len(), 1);
    assert_eq!(stored.signals.today.foods, vec!["Huevo".to_owned()]);

    let metrics = build_dashboard_metrics(&[], &outcome.plan, now);
    let reply = fallback_reply(&outcome, &metrics, &outcome.plan.cognitive_profile);
    assert!(reply.starts_with("Anotado: Huevo, 120 g (172 kcal)."));
}

#[test]
fn test_yesterday_food_lands_in_history() {
    let store = memory_store();
    let now = tuesday_noon();

    let outcome =
        ingest_user_message(&store, "ayer comi pollo", now, MADRID, FoodParserPolicy::default())
            .unwrap();

    assert_eq!(outcome.status, MutationStatus::Applied);
    let entry = outcome.mutation.entry().unwrap();
    assert_eq!(entry.grams, 150.0);
    assert!(entry.is_estimated);
    assert!(entry.assumption_note.is_some());
    assert_eq!(outcome.mutation.target().unwrap().date_iso, "2025-10-13");

    let snapshot = &outcome.plan.history.days[MONDAY];
    assert_eq!(snapshot.food_entries.len(), 1);
    assert!(outcome.plan.signals.today.food_entries.is_empty());
    assert!(outcome.plan.signals.today.foods.is_empty());

    let metrics = build_dashboard_metrics(&[], &outcome.plan, now);
    let reply = fallback_reply(&outcome, &metrics, &outcome.plan.cognitive_profile);
    assert!(reply.starts_with("Anotado (ayer 13/10): Pechuga de pollo, 150 g"));
}

#[test]
fn test_weekday_food_waits_for_confirmation() {
    let store = memory_store();
    let now = tuesday_noon();

    let outcome = ingest_user_message(
        &store,
        "el lunes comi arroz",
        now,
        MADRID,
        FoodParserPolicy::default(),
    )
    .unwrap();

    assert_eq!(outcome.status, MutationStatus::PendingConfirmation);
    assert!(outcome.plan.history.days.is_empty());
    let metrics = build_dashboard_metrics(&[], &outcome.plan, now);
    let reply = fallback_reply(&outcome, &metrics, &outcome.plan.cognitive_profile);
    assert!(reply.starts_with("¿Lo registro para el lunes 13/10?"));

    let plan = confirm_food_mutation(&store, outcome.mutation, now).unwrap();
    let snapshot = &plan.history.days[MONDAY];
    assert_eq!(snapshot.food_entries.len(), 1);
    assert_eq!(snapshot.food_entries[0].name, "Arroz cocido");
}

#[test]
fn test_weekday_without_confirmation_policy_applies_directly() {
    let store = memory_store();
    let policy = FoodParserPolicy {
        confirm_weekday: false,
    };

    let outcome =
        ingest_user_message(&store, "el lunes comi arroz", tuesday_noon(), MADRID, policy)
            .unwrap();

    assert_eq!(outcome.status, MutationStatus::Applied);
    assert_eq!(outcome.plan.history.days[MONDAY].food_entries.len(), 1);
}

#[test]
fn test_correction_without_target_reports_nothing_to_correct() {
    let store = memory_store();
    let now = tuesday_noon();

    let outcome = ingest_user_message(
        &store,
        "corrige el arroz, eran 100 g",
        now,
        MADRID,
        FoodParserPolicy::default(),
    )
    .unwrap();

    assert_eq!(outcome.status, MutationStatus::NothingToCorrect);
    assert!(outcome.mutation.is_none());
    assert!(outcome.plan.signals.today.food_entries.is_empty());

    let metrics = build_dashboard_metrics(&[], &outcome.plan, now);
    let reply = fallback_reply(&outcome, &metrics, &outcome.plan.cognitive_profile);
    assert!(reply.starts_with("No encontré qué corregir"));
}

#[test]
fn test_correction_updates_today_ledger() {
    let store = memory_store();
    let policy = FoodParserPolicy::default();
    ingest_user_message(&store, "comi 200 g de arroz", tuesday_noon(), MADRID, policy).unwrap();

    let outcome = ingest_user_message(
        &store,
        "me equivoque, eran 150 g de arroz",
        utc(2025, 10, 14, 10, 5),
        MADRID,
        policy,
    )
    .unwrap();

    assert_eq!(outcome.status, MutationStatus::Applied);
    assert!(matches!(outcome.mutation, ParsedFoodMutation::Correct { .. }));
    assert_eq!(outcome.plan.signals.today.kcal_in, 195.0);
}

#[test]
fn test_training_message_adds_burn() {
    let store = memory_store();
    let now = tuesday_noon();
    store
        .upsert_coach_plan_at(
            CoachPlanPatch::physical(PhysicalProfile {
                weight_kg: Some(70.0),
                ..PhysicalProfile::default()
            }),
            now,
        )
        .unwrap();

    let outcome = ingest_user_message(
        &store,
        "sali a correr 30 min",
        now,
        MADRID,
        FoodParserPolicy::default(),
    )
    .unwrap();

    assert_eq!(outcome.category, EventCategory::Training);
    assert_eq!(outcome.status, MutationStatus::NoMutation);
    let today = &outcome.plan.signals.today;
    assert_eq!(today.kcal_out, 343.0);
    assert_eq!(today.activities, vec!["correr".to_owned()]);
}

#[test]
fn test_weight_message_sets_today_weight() {
    let store = memory_store();
    let now = tuesday_noon();

    let outcome =
        ingest_user_message(&store, "hoy peso 72 kg", now, MADRID, FoodParserPolicy::default())
            .unwrap();

    assert_eq!(outcome.category, EventCategory::Weight);
    assert_eq!(outcome.plan.signals.today.weight_kg, Some(72.0));

    let metrics = build_dashboard_metrics(&[], &outcome.plan, now);
    let reply = fallback_reply(&outcome, &metrics, &outcome.plan.cognitive_profile);
    assert!(reply.starts_with("Peso anotado: 72 kg."));
}

#[test]
fn test_next_day_message_rotates_first() {
    let store = memory_store();
    let policy = FoodParserPolicy::default();
    ingest_user_message(&store, "comi 2 huevos", tuesday_noon(), MADRID, policy).unwrap();

    let outcome = ingest_user_message(
        &store,
        "comi una manzana",
        utc(2025, 10, 15, 9, 0),
        MADRID,
        policy,
    )
    .unwrap();

    assert!(outcome.rotated);
    assert_eq!(outcome.previous_day_id.as_deref(), Some(TUESDAY));
    let closed = &outcome.plan.history.days[TUESDAY];
    assert!(closed.closed);
    assert_eq!(closed.kcal_in, 172.0);
    assert_eq!(
        outcome.plan.signals.today.day_id,
        "2025-10-15@Europe/Madrid"
    );
    assert_eq!(outcome.plan.signals.today.food_entries.len(), 1);
}

#[test]
fn test_small_talk_records_nothing() {
    let store = memory_store();
    let outcome = ingest_user_message(
        &store,
        "hola, que tal",
        tuesday_noon(),
        MADRID,
        FoodParserPolicy::default(),
    )
    .unwrap();

    assert_eq!(outcome.status, MutationStatus::NoMutation);
    assert_eq!(outcome.category, EventCategory::Other);
    assert!(!outcome.plan.signals.today.has_data());
    assert_eq!(store.storage().write_count(), 1);
}
