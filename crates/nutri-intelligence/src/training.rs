// ABOUTME: Training activity detection and MET-based energy expenditure estimation
// ABOUTME: Maps Spanish activity words to canonical activities with compendium MET values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Training burn estimation
//!
//! # Scientific References
//!
//! - Ainsworth, B.E., et al. (2011). 2011 Compendium of Physical Activities.
//!   *Med Sci Sports Exerc*, 43(8), 1575-1581. DOI: 10.1249/MSS.0b013e31821ece12
//!
//! Burn (kcal) = MET x body weight (kg) x duration (h).

use serde::Serialize;

use crate::text::normalize_text;

/// Canonical training activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingActivity {
    /// Canonical Spanish name
    pub name: &'static str,
    /// Metabolic equivalent of task
    pub met: f64,
}

/// Activity table: canonical name, MET, word forms; forms with a space match as phrases
const ACTIVITIES: &[(&str, f64, &[&str])] = &[
    ("correr", 9.8, &["correr", "corri", "corro", "corriendo", "running", "carrera", "trote", "trotar"]),
    ("bici", 7.5, &["bici", "bicicleta", "ciclismo", "spinning"]),
    ("natacion", 8.0, &["nadar", "nade", "nado", "nadando", "natacion", "piscina"]),
    ("tenis", 7.3, &["tenis"]),
    ("padel", 6.0, &["padel"]),
    ("futbol", 7.0, &["futbol", "fulbito", "jugue un partido", "jugamos un partido"]),
    ("hiit", 8.0, &["hiit", "crossfit", "tabata"]),
    ("gimnasio", 5.0, &["gimnasio", "gym", "pesas", "fuerza", "musculacion"]),
    ("pilates", 3.0, &["pilates"]),
    ("yoga", 2.5, &["yoga"]),
    ("caminar", 3.5, &["caminar", "camine", "caminata", "caminando", "pasee", "di un paseo"]),
];

/// Generic training words that carry no specific activity
const GENERIC_TRAINING_WORDS: &[&str] = &[
    "entrene",
    "entreno",
    "entrenar",
    "entrenamiento",
    "entrenando",
    "ejercicio",
    "deporte",
    "cardio",
];

/// Detect the first known activity mentioned in `text`
#[must_use]
pub fn detect_activity(text: &str) -> Option<TrainingActivity> {
    let normalized = normalize_text(text);
    let words: Vec<&str> = normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();
    ACTIVITIES
        .iter()
        .find(|(_, _, forms)| {
            forms.iter().any(|form| {
                if form.contains(' ') {
                    normalized.contains(form)
                } else {
                    words.contains(form)
                }
            })
        })
        .map(|&(name, met, _)| TrainingActivity { name, met })
}

/// Whether `text` mentions training, specific or generic
#[must_use]
pub fn mentions_training(text: &str) -> bool {
    if detect_activity(text).is_some() {
        return true;
    }
    let normalized = normalize_text(text);
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| GENERIC_TRAINING_WORDS.contains(&word))
}

/// Whether `text` mentions the activity named `activity`
///
/// Matches the canonical name, any of its word forms, or the raw name itself.
#[must_use]
pub fn mentions_activity(text: &str, activity: &str) -> bool {
    let normalized = normalize_text(text);
    let target = normalize_text(activity);
    if target.is_empty() {
        return false;
    }
    if normalized.contains(&target) {
        return true;
    }
    let canonical = detect_activity(&target).map(|found| found.name);
    canonical.is_some_and(|name| detect_activity(&normalized).is_some_and(|found| found.name == name))
}

/// Estimated burn of a session
#[must_use]
pub fn estimate_training_kcal(met: f64, body_weight_kg: f64, duration_min: f64) -> f64 {
    (met * body_weight_kg * duration_min / 60.0).round()
}
