// ABOUTME: Integration tests for the food catalog, parser, and correction ledger
// ABOUTME: Verifies kcal arithmetic, correction chains, and day resolution across timezones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use common::{tuesday_noon, utc, MADRID};
use nutri_core::constants::ledger::MAX_CORRECTION_DEPTH;
use nutri_core::models::{FoodEntry, FoodSource};
use nutri_intelligence::{
    catalog_item_by_id, compute_day_food_totals, compute_from_catalog, find_catalog_item_by_text,
    find_last_matching_entry, parse_food_mutation, resolve_effective_entries, FoodEntryOptions,
    FoodParserPolicy, ParsedFoodMutation,
};

fn entry(item_id: &str, grams: f64, id: &str, linked: Option<&str>, at: DateTime<Utc>) -> FoodEntry {
    let item = catalog_item_by_id(item_id).unwrap();
    let mut options = FoodEntryOptions::new(FoodSource::User, at).with_id(id);
    if let Some(parent) = linked {
        options = options.linked_to(parent);
    }
    compute_from_catalog(item, grams, options)
}

fn parse(text: &str, now: DateTime<Utc>, existing: &BTreeMap<String, Vec<FoodEntry>>) -> ParsedFoodMutation {
    parse_food_mutation(
        text,
        MADRID,
        "2025-10-14@Europe/Madrid",
        now,
        existing,
        FoodParserPolicy::default(),
    )
}

#[test]
fn test_catalog_lookup_ignores_case_and_accents() {
    let item = find_catalog_item_by_text("Me tomé un CAFÉ CON LECHE").unwrap();
    assert_eq!(item.id, find_catalog_item_by_text("cafe con leche").unwrap().id);
    assert!(find_catalog_item_by_text("nada por aqui").is_none());
}

#[test]
fn test_kcal_scales_per_100g() {
    let base = tuesday_noon();
    let rice = entry("arroz", 200.0, "a", None, base);
    assert_eq!(rice.kcal, 260.0);
    assert_eq!(rice.catalog_item_id.as_deref(), Some("arroz"));

    let eggs = entry("huevo", 120.0, "b", None, base);
    assert_eq!(eggs.kcal, 172.0);
}

#[test]
fn test_correction_chain_keeps_latest_entry() {
    let base = tuesday_noon();
    let entries = vec![
        entry("arroz", 200.0, "a", None, base),
        entry("arroz", 150.0, "b", Some("a"), base + Duration::minutes(10)),
        entry("manzana", 180.0, "d", None, base + Duration::minutes(15)),
        entry("arroz", 100.0, "c", Some("b"), base + Duration::minutes(20)),
    ];

    let effective = resolve_effective_entries(&entries);
    let ids: Vec<&str> = effective.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["d", "c"]);
    assert_eq!(resolve_effective_entries(&effective), effective);

    let totals = compute_day_food_totals(&entries);
    assert_eq!(totals.meals_count, 2);
    assert_eq!(totals.kcal, 130.0 + 94.0);

    let last_rice = find_last_matching_entry(&entries, Some("arroz")).unwrap();
    assert_eq!(last_rice.id, "c");
    assert_eq!(find_last_matching_entry(&entries, None).unwrap().id, "c");
}

#[test]
fn test_link_to_a_newer_entry_is_not_followed() {
    let base = tuesday_noon();
    let entries = vec![
        entry("arroz", 200.0, "a", Some("b"), base),
        entry("pasta", 100.0, "b", None, base + Duration::minutes(5)),
    ];

    assert_eq!(resolve_effective_entries(&entries).len(), 2);
}

fn correction_chain(links: usize) -> Vec<FoodEntry> {
    let base = tuesday_noon();
    (0..=links)
        .map(|step| {
            let id = format!("e{step}");
            let parent = step.checked_sub(1).map(|previous| format!("e{previous}"));
            let at = base + Duration::minutes(i64::try_from(step).unwrap());
            entry("arroz", 150.0, &id, parent.as_deref(), at)
        })
        .collect()
}

#[test]
fn test_ten_link_chain_resolves_to_newest() {
    let entries = correction_chain(MAX_CORRECTION_DEPTH);

    let effective = resolve_effective_entries(&entries);
    let ids: Vec<&str> = effective.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["e10"]);
    assert_eq!(compute_day_food_totals(&entries).meals_count, 1);
}

#[test]
fn test_chain_past_depth_bound_terminates() {
    let entries = correction_chain(MAX_CORRECTION_DEPTH + 4);

    let effective = resolve_effective_entries(&entries);
    assert!(!effective.is_empty());
    assert!(effective.len() < entries.len());
    assert_eq!(effective.last().map(|entry| entry.id.as_str()), Some("e14"));
}

#[test]
fn test_self_link_stops_traversal() {
    let base = tuesday_noon();
    let entries = vec![
        entry("arroz", 200.0, "a", Some("a"), base),
        entry("manzana", 180.0, "b", None, base + Duration::minutes(5)),
    ];

    let effective = resolve_effective_entries(&entries);
    let ids: Vec<&str> = effective.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_cyclic_links_terminate() {
    let base = tuesday_noon();
    let entries = vec![
        entry("arroz", 200.0, "a", Some("b"), base),
        entry("arroz", 150.0, "b", Some("a"), base),
    ];

    let effective = resolve_effective_entries(&entries);
    assert!(!effective.is_empty());
    assert!(effective.len() <= 2);
}

#[test]
fn test_counted_units_are_user_reported() {
    let mutation = parse("comi 2 huevos", tuesday_noon(), &BTreeMap::new());
    let ParsedFoodMutation::Add { target, entry } = mutation else {
        panic!("expected an addition");
    };
    assert_eq!(target.day_id, "2025-10-14@Europe/Madrid");
    assert_eq!(entry.grams, 120.0);
    assert_eq!(entry.kcal, 172.0);
    assert_eq!(entry.source, FoodSource::User);
}

#[test]
fn test_default_serving_is_estimated() {
    let mutation = parse("ayer comi pollo", tuesday_noon(), &BTreeMap::new());
    let target = mutation.target().unwrap();
    assert_eq!(target.day_id, "2025-10-13@Europe/Madrid");
    assert!(target.is_retroactive);
    assert!(!target.requires_confirmation);

    let entry = mutation.entry().unwrap();
    assert_eq!(entry.grams, 150.0);
    assert!(entry.is_estimated);
    assert_eq!(entry.source, FoodSource::Database);
}

#[test]
fn test_local_midnight_decides_the_day() {
    // 23:30 UTC on the 13th is already the 14th in Madrid
    let late = utc(2025, 10, 13, 23, 30);
    let mutation = parse_food_mutation(
        "comi una manzana",
        MADRID,
        "",
        late,
        &BTreeMap::new(),
        FoodParserPolicy::default(),
    );
    assert_eq!(
        mutation.target().unwrap().day_id,
        "2025-10-14@Europe/Madrid"
    );
}

#[test]
fn test_correction_links_previous_entry() {
    let now = tuesday_noon();
    let mut existing = BTreeMap::new();
    existing.insert(
        "2025-10-14@Europe/Madrid".to_owned(),
        vec![entry("arroz", 200.0, "first", None, now)],
    );

    let mutation = parse(
        "me equivoque, eran 150 g de arroz",
        now + Duration::minutes(5),
        &existing,
    );
    let ParsedFoodMutation::Correct {
        entry,
        corrected_entry_id,
        ..
    } = mutation
    else {
        panic!("expected a correction");
    };
    assert_eq!(corrected_entry_id, "first");
    assert_eq!(entry.linked_entry_id.as_deref(), Some("first"));
    assert_eq!(entry.kcal, 195.0);
}

#[test]
fn test_correction_without_previous_entry_is_none() {
    let mutation = parse("corrige el arroz, eran 100 g", tuesday_noon(), &BTreeMap::new());
    assert!(mutation.is_none());
}
