// ABOUTME: Immutable food ledger - entry computation, correction supersession, and daily totals
// ABOUTME: Corrections form a parent-pointer forest resolved by bounded traversal to the newest entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food Ledger
//!
//! Entries are never edited. A correction is a new entry whose
//! `linked_entry_id` points at the entry it replaces; the set of entries that
//! count toward a day ("effective entries") keeps only the newest entry of
//! each correction chain.
//!
//! Chain walks are bounded by [`MAX_CORRECTION_DEPTH`] and stop at any parent
//! that is missing or newer than its child, so malformed persisted data can
//! neither loop nor reorder history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use nutri_core::constants::ledger::MAX_CORRECTION_DEPTH;
use nutri_core::dates::{parse_iso, to_iso};
use nutri_core::models::{DayFoodTotals, FoodCatalogItem, FoodEntry, FoodSource};
use uuid::Uuid;

use crate::text::normalize_text;

/// Provenance and bookkeeping for a computed entry
#[derive(Debug, Clone)]
pub struct FoodEntryOptions {
    /// Where the quantity came from
    pub source: FoodSource,
    /// Whether the quantity was assumed
    pub is_estimated: bool,
    /// Description of the assumption
    pub assumption_note: Option<String>,
    /// Entry being corrected
    pub linked_entry_id: Option<String>,
    /// Explicit id; a v4 UUID is generated when absent
    pub id: Option<String>,
    /// Creation instant
    pub created_at: DateTime<Utc>,
}

impl FoodEntryOptions {
    /// Options for a non-estimated, unlinked entry
    #[must_use]
    pub const fn new(source: FoodSource, created_at: DateTime<Utc>) -> Self {
        Self {
            source,
            is_estimated: false,
            assumption_note: None,
            linked_entry_id: None,
            id: None,
            created_at,
        }
    }

    /// Mark the quantity as assumed, with a note
    #[must_use]
    pub fn estimated(mut self, note: impl Into<String>) -> Self {
        self.is_estimated = true;
        self.assumption_note = Some(note.into());
        self
    }

    /// Attach a note without marking the entry as estimated
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.assumption_note = Some(note.into());
        self
    }

    /// Link to the entry being corrected
    #[must_use]
    pub fn linked_to(mut self, entry_id: impl Into<String>) -> Self {
        self.linked_entry_id = Some(entry_id.into());
        self
    }

    /// Use a fixed id instead of a generated one
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute a ledger entry for `grams` of a catalog item
///
/// Per-100g values are scaled by `grams / 100`; kcal is rounded to an integer
/// and macros to one decimal.
#[must_use]
pub fn compute_from_catalog(
    item: &FoodCatalogItem,
    grams: f64,
    options: FoodEntryOptions,
) -> FoodEntry {
    let factor = grams / 100.0;
    let macros = &item.per_100g;
    FoodEntry {
        id: options
            .id
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        name: item.name.clone(),
        grams,
        kcal: (macros.kcal * factor).round(),
        protein_g: round1(macros.protein_g * factor),
        carbs_g: round1(macros.carbs_g * factor),
        fat_g: round1(macros.fat_g * factor),
        fiber_g: macros.fiber_g.map(|fiber| round1(fiber * factor)),
        is_estimated: options.is_estimated,
        assumption_note: options.assumption_note,
        source: options.source,
        linked_entry_id: options.linked_entry_id,
        catalog_item_id: Some(item.id.clone()),
        created_at: to_iso(options.created_at),
    }
}

fn created_instant(entry: &FoodEntry) -> DateTime<Utc> {
    parse_iso(&entry.created_at).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Index of the root of `index`'s correction chain
fn chain_root(entries: &[FoodEntry], by_id: &HashMap<&str, usize>, index: usize) -> usize {
    let mut current = index;
    for _ in 0..MAX_CORRECTION_DEPTH {
        let Some(parent_id) = entries[current].linked_entry_id.as_deref() else {
            break;
        };
        let Some(&parent) = by_id.get(parent_id) else {
            break;
        };
        if parent == current || created_instant(&entries[parent]) > created_instant(&entries[current]) {
            break;
        }
        current = parent;
    }
    current
}

/// Entries that count after corrections, sorted by creation time
///
/// Each chain contributes only its most recently created entry; on equal
/// timestamps the later position in `entries` wins. Applying the function
/// to its own output returns the same entries.
#[must_use]
pub fn resolve_effective_entries(entries: &[FoodEntry]) -> Vec<FoodEntry> {
    let mut by_id: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        by_id.entry(entry.id.as_str()).or_insert(index);
    }

    // root index -> winning entry index
    let mut winners: HashMap<usize, usize> = HashMap::new();
    for index in 0..entries.len() {
        let root = chain_root(entries, &by_id, index);
        winners
            .entry(root)
            .and_modify(|winner| {
                if created_instant(&entries[index]) >= created_instant(&entries[*winner]) {
                    *winner = index;
                }
            })
            .or_insert(index);
    }

    let mut effective: Vec<usize> = winners.into_values().collect();
    effective.sort_by(|a, b| {
        created_instant(&entries[*a])
            .cmp(&created_instant(&entries[*b]))
            .then(a.cmp(b))
    });
    effective.into_iter().map(|index| entries[index].clone()).collect()
}

/// Aggregate the effective entries of one day
#[must_use]
pub fn compute_day_food_totals(entries: &[FoodEntry]) -> DayFoodTotals {
    let effective = resolve_effective_entries(entries);
    let mut totals = effective
        .iter()
        .fold(DayFoodTotals::default(), |mut acc, entry| {
            acc.kcal += entry.kcal;
            acc.protein_g += entry.protein_g;
            acc.carbs_g += entry.carbs_g;
            acc.fat_g += entry.fat_g;
            acc.fiber_g += entry.fiber_g.unwrap_or(0.0);
            acc
        });
    totals.kcal = totals.kcal.round();
    totals.protein_g = round1(totals.protein_g);
    totals.carbs_g = round1(totals.carbs_g);
    totals.fat_g = round1(totals.fat_g);
    totals.fiber_g = round1(totals.fiber_g);
    totals.meals_count = effective.len();
    totals
}

/// Most recent effective entry whose name or catalog id matches `name_like`
///
/// With no filter the most recent effective entry is returned.
#[must_use]
pub fn find_last_matching_entry(entries: &[FoodEntry], name_like: Option<&str>) -> Option<FoodEntry> {
    let needle = name_like.map(normalize_text).filter(|needle| !needle.is_empty());
    resolve_effective_entries(entries)
        .into_iter()
        .rev()
        .find(|entry| {
            needle.as_deref().is_none_or(|needle| {
                let name = normalize_text(&entry.name);
                name.contains(needle)
                    || needle.contains(&name)
                    || entry.catalog_item_id.as_deref() == Some(needle)
            })
        })
}
