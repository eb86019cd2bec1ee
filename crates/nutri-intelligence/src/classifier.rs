// ABOUTME: Event classification strategy and numeric extractors for free-text chat messages
// ABOUTME: Keyword classifier (weight > training > food > other) plus kcal, weight, duration, meal parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::LazyLock;

use nutri_core::validation;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::MealDefaultsConfig;
use crate::food_catalog::find_catalog_item_by_text;
use crate::text::{normalize_text, parse_decimal};
use crate::training::mentions_training;

static KCAL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 650 kcal, 300 calorias, 1.200 cal
    Regex::new(r"\b(\d+(?:[.,]\d+)?)\s*(?:kcal|kilocalorias|calorias|cal)\b").ok()
});

static WEIGHT_UNIT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 72 kg, 80,5 kilos
    Regex::new(r"\b(\d{2,3}(?:[.,]\d{1,2})?)\s*(?:kg|kgs|kilos?|kilogramos?)\b").ok()
});

static WEIGHT_VERB_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: peso 72, pese 71,8, mi peso es 80
    Regex::new(r"\b(?:peso|pese|pesaba|peso es|bascula marca)\s+(?:de\s+)?(\d{2,3}(?:[.,]\d{1,2})?)\b").ok()
});

static MINUTES_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b(\d+(?:[.,]\d+)?)\s*(?:min|mins|minutos?)\b").ok()
});

static HOURS_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b(\d+(?:[.,]\d+)?)\s*(?:h|hr|hrs|horas?)\b").ok()
});

static FOOD_WORD_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:comi|comido|comer|como|desayun\w*|almorc\w*|almuerz\w*|cene|cena|cenar|merend\w*|merienda|snack|picote\w*|bebi|tome)\b",
    )
    .ok()
});

/// Category of a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// Body weight report
    Weight,
    /// Training session
    Training,
    /// Food intake
    Food,
    /// Anything else
    Other,
}

/// Strategy for classifying free-text user messages
pub trait EventClassifier: Send + Sync {
    /// Classify one message
    fn classify(&self, text: &str) -> EventCategory;
}

/// Keyword-based classifier
///
/// Priority is weight, then training, then food: "peso 72 kg despues de correr"
/// is a weight report, "corri y luego comi" a training message.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl EventClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> EventCategory {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return EventCategory::Other;
        }
        if extract_weight_kg(&normalized).is_some() {
            return EventCategory::Weight;
        }
        if mentions_training(&normalized) {
            return EventCategory::Training;
        }
        let has_food_word = FOOD_WORD_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(&normalized));
        if has_food_word || find_catalog_item_by_text(&normalized).is_some() {
            return EventCategory::Food;
        }
        EventCategory::Other
    }
}

/// Meal slot named in a food message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// "desayuno"
    Breakfast,
    /// "almuerzo", "comida"
    Lunch,
    /// "merienda"
    AfternoonSnack,
    /// "cena"
    Dinner,
    /// "snack", "picoteo", "tentempie"
    Snack,
    /// Unspecified
    Other,
}

impl MealType {
    /// Default kcal assumed for this meal
    #[must_use]
    pub const fn default_kcal(self, defaults: &MealDefaultsConfig) -> f64 {
        match self {
            Self::Breakfast => defaults.breakfast,
            Self::Lunch => defaults.lunch,
            Self::AfternoonSnack => defaults.afternoon_snack,
            Self::Dinner => defaults.dinner,
            Self::Snack => defaults.snack,
            Self::Other => defaults.other,
        }
    }
}

/// Meal slot a message refers to
#[must_use]
pub fn detect_meal_type(text: &str) -> MealType {
    let normalized = normalize_text(text);
    let has = |stems: &[&str]| {
        normalized
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| stems.iter().any(|stem| word.starts_with(stem)))
    };
    if has(&["desayun"]) {
        MealType::Breakfast
    } else if has(&["merend", "merienda"]) {
        MealType::AfternoonSnack
    } else if has(&["almorz", "almuerz", "almorc", "comida"]) {
        MealType::Lunch
    } else if has(&["cena", "cene", "ceno"]) {
        MealType::Dinner
    } else if has(&["snack", "picote", "tentempie", "picar"]) {
        MealType::Snack
    } else {
        MealType::Other
    }
}

fn first_capture(pattern: &LazyLock<Option<Regex>>, text: &str) -> Option<f64> {
    let caps = pattern.as_ref()?.captures(text)?;
    parse_decimal(caps.get(1)?.as_str())
}

/// Explicit kcal figure mentioned in a message
#[must_use]
pub fn extract_kcal(text: &str) -> Option<f64> {
    let normalized = normalize_text(text);
    // "1.200 kcal" uses a thousands separator, not a decimal point
    let caps = KCAL_PATTERN.as_ref()?.captures(&normalized)?;
    let raw = caps.get(1)?.as_str();
    let value = match raw.split_once('.') {
        Some((_, decimals)) if decimals.len() == 3 => parse_decimal(&raw.replace('.', "")),
        _ => parse_decimal(raw),
    }?;
    validation::day_kcal(value).filter(|kcal| *kcal > 0.0)
}

/// Explicit body weight mentioned in a message, range-validated
#[must_use]
pub fn extract_weight_kg(text: &str) -> Option<f64> {
    let normalized = normalize_text(text);
    first_capture(&WEIGHT_UNIT_PATTERN, &normalized)
        .or_else(|| first_capture(&WEIGHT_VERB_PATTERN, &normalized))
        .and_then(validation::weight_kg)
}

/// Explicit session duration in minutes ("45 min", "1,5 horas", "una hora", "media hora")
#[must_use]
pub fn extract_duration_min(text: &str) -> Option<f64> {
    let normalized = normalize_text(text);
    let minutes = first_capture(&MINUTES_PATTERN, &normalized)
        .or_else(|| first_capture(&HOURS_PATTERN, &normalized).map(|hours| hours * 60.0))
        .or_else(|| {
            if normalized.contains("hora y media") {
                Some(90.0)
            } else if normalized.contains("media hora") {
                Some(30.0)
            } else if normalized.contains("una hora") {
                Some(60.0)
            } else {
                None
            }
        })?;
    validation::session_minutes(minutes)
}
