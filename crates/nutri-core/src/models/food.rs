// ABOUTME: Food tracking models for catalog reference data and immutable ledger entries
// ABOUTME: FoodCatalogItem, MacrosPer100g, FoodEntry, FoodSource, and DayFoodTotals definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Macronutrients per 100 grams of a food
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacrosPer100g {
    /// Energy (kcal)
    pub kcal: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbohydrates (g)
    pub carbs_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Fiber (g)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
}

/// Static reference entry of the food catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCatalogItem {
    /// Stable identifier
    pub id: String,
    /// Display name used for ledger entries
    pub name: String,
    /// Normalized aliases matched against user text
    pub aliases: Vec<String>,
    /// Default serving in grams when no quantity is given
    pub default_serving_g: f64,
    /// Unit word to grams conversions ("unidad", "rebanada", ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub units: BTreeMap<String, f64>,
    /// Macros per 100 g
    pub per_100g: MacrosPer100g,
}

impl FoodCatalogItem {
    /// Grams represented by one `unit`, if the unit is known for this item
    #[must_use]
    pub fn grams_per_unit(&self, unit: &str) -> Option<f64> {
        self.units.get(unit).copied()
    }
}

/// Provenance of a food entry's numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodSource {
    /// Quantity stated explicitly by the user
    User,
    /// Read from a nutrition label
    Label,
    /// Catalog defaults
    Database,
    /// Estimated by a language model
    Llm,
}

impl FoodSource {
    /// Parse a source from its persisted name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "user" => Some(Self::User),
            "label" => Some(Self::Label),
            "database" | "db" => Some(Self::Database),
            "llm" | "ai" => Some(Self::Llm),
            _ => None,
        }
    }
}

/// Immutable food ledger entry
///
/// Corrections never mutate an entry; they create a new one whose
/// `linked_entry_id` points at the entry being corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    /// Unique identifier
    pub id: String,
    /// Food name
    pub name: String,
    /// Quantity in grams
    pub grams: f64,
    /// Energy (kcal, integer-rounded)
    pub kcal: f64,
    /// Protein (g, one decimal)
    pub protein_g: f64,
    /// Carbohydrates (g, one decimal)
    pub carbs_g: f64,
    /// Fat (g, one decimal)
    pub fat_g: f64,
    /// Fiber (g, one decimal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
    /// Whether the quantity was assumed rather than stated
    pub is_estimated: bool,
    /// Human-readable description of the assumption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumption_note: Option<String>,
    /// Provenance of the numbers
    pub source: FoodSource,
    /// Entry this one corrects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_entry_id: Option<String>,
    /// Catalog item the entry was computed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_item_id: Option<String>,
    /// Creation timestamp (RFC 3339, sortable)
    pub created_at: String,
}

/// Aggregated food totals for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayFoodTotals {
    /// Energy (kcal)
    pub kcal: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbohydrates (g)
    pub carbs_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Fiber (g)
    pub fiber_g: f64,
    /// Number of effective entries
    pub meals_count: usize,
}
