// ABOUTME: Physical profile inference from onboarding checklists and free-text mentions
// ABOUTME: Explicit fields win, then numbered checklist answers, then free text, newest message first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physical profile inference
//!
//! Onboarding asks the user to answer a numbered checklist:
//!
//! ```text
//! 1. Sexo  2. Edad  3. Altura  4. Peso  5. % grasa  6. Nivel de actividad
//! ```
//!
//! Answers may carry labels ("2) edad: 34") or rely on the question order
//! ("2. 34"). Checklist answers are trusted over incidental mentions in
//! free text, and nothing inferred ever replaces a field the plan already
//! holds explicitly.

use std::sync::LazyLock;

use nutri_core::models::{ActivityLevel, PhysicalProfile, Sex};
use nutri_core::validation;
use regex::Regex;

use crate::classifier::extract_weight_kg;
use crate::text::{normalize_text, parse_decimal};

static CHECKLIST_LINE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: "1. hombre", "2) 34", "3 - 178 cm", "4: 80 kg"; not "2:45"
    Regex::new(r"^\s*(\d{1,2})\s*[.)\-:]\s+(\S.*)$").ok()
});

static BARE_MEASURE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: "34", "34 anos", "1,78 m", "180 cm", "85 kg", "20 %"
    Regex::new(r"^\d+(?:[.,]\d+)?\s*(?:anos|cm|m|metros|kg|kilos|%)?$").ok()
});

/// Checklist lines needed before unlabeled answers are read by position
const MIN_CHECKLIST_ANSWERS: usize = 2;

static NUMBER_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").ok());

static AGE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 34 anos, tengo 34, edad: 34
    Regex::new(r"\b(?:(\d{2})\s*anos\b|tengo\s+(\d{2})\b|edad\s*:?\s*(\d{2})\b)").ok()
});

static HEIGHT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 178 cm, 1,78 m, mido 1.78, mido 178
    Regex::new(
        r"\b(?:(\d{3})\s*(?:cm|centimetros)\b|(\d[.,]\d{2})\s*(?:m|metros)\b|mido\s+(\d[.,]\d{2}|\d{3})\b)",
    )
    .ok()
});

static BODY_FAT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 20% de grasa, grasa corporal 18, 15 % gc
    Regex::new(
        r"(?:\b(\d{1,2}(?:[.,]\d)?)\s*%\s*(?:de\s+)?(?:grasa|gc)\b|\bgrasa(?:\s+corporal)?\s*(?:de|:)?\s*(\d{1,2}(?:[.,]\d)?))",
    )
    .ok()
});

/// Checklist question order used when an answer carries no label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChecklistField {
    Sex,
    Age,
    Height,
    Weight,
    BodyFat,
    Activity,
}

impl ChecklistField {
    const fn from_position(position: u32) -> Option<Self> {
        match position {
            1 => Some(Self::Sex),
            2 => Some(Self::Age),
            3 => Some(Self::Height),
            4 => Some(Self::Weight),
            5 => Some(Self::BodyFat),
            6 => Some(Self::Activity),
            _ => None,
        }
    }

    fn from_label(answer: &str) -> Option<Self> {
        let label = match answer.split_once(':') {
            Some((label, _)) => label,
            None => answer
                .split(|c: char| c.is_ascii_digit())
                .next()
                .unwrap_or_default(),
        };
        let has = |words: &[&str]| words.iter().any(|word| label.contains(word));
        if has(&["sexo", "genero"]) {
            Some(Self::Sex)
        } else if has(&["edad"]) {
            Some(Self::Age)
        } else if has(&["altura", "estatura", "talla", "mido"]) {
            Some(Self::Height)
        } else if has(&["grasa"]) {
            Some(Self::BodyFat)
        } else if has(&["peso"]) {
            Some(Self::Weight)
        } else if has(&["actividad", "activo", "activa", "sedentari"]) {
            Some(Self::Activity)
        } else {
            None
        }
    }
}

fn first_number(text: &str) -> Option<f64> {
    let found = NUMBER_PATTERN.as_ref()?.find(text)?;
    parse_decimal(found.as_str())
}

fn first_group(pattern: &LazyLock<Option<Regex>>, text: &str) -> Option<f64> {
    let caps = pattern.as_ref()?.captures(text)?;
    let group = caps.iter().skip(1).flatten().next()?;
    parse_decimal(group.as_str())
}

fn normalize_height(value: f64) -> f64 {
    if value < 3.0 {
        (value * 100.0).round()
    } else {
        value
    }
}

fn parse_sex(text: &str) -> Option<Sex> {
    text.split(|c: char| !c.is_alphanumeric())
        .find_map(|word| match word {
            "hombre" | "varon" | "masculino" | "chico" => Some(Sex::Male),
            "mujer" | "femenino" | "chica" => Some(Sex::Female),
            _ => None,
        })
}

/// Activity level words; `answer_only` also accepts bare "alta/media/baja" answers
fn parse_activity_level(text: &str, answer_only: bool) -> Option<ActivityLevel> {
    let has = |needles: &[&str]| needles.iter().any(|needle| text.contains(needle));
    if has(&["muy activ"]) || (answer_only && has(&["alta", "alto"])) {
        Some(ActivityLevel::VeryActive)
    } else if has(&["sedentari", "nada activ"]) {
        Some(ActivityLevel::Sedentary)
    } else if has(&["moderadamente activ", "actividad moderada"])
        || (answer_only && has(&["moderad", "medio", "media"]))
    {
        Some(ActivityLevel::Moderate)
    } else if has(&["poco activ", "ligeramente activ", "actividad ligera"])
        || (answer_only && has(&["liger", "baja", "bajo"]))
    {
        Some(ActivityLevel::Light)
    } else {
        None
    }
}

fn apply_checklist_answer(profile: &mut PhysicalProfile, field: ChecklistField, answer: &str) {
    match field {
        ChecklistField::Sex => {
            profile.sex = profile.sex.or_else(|| parse_sex(answer));
        }
        ChecklistField::Age => {
            profile.age_years = profile
                .age_years
                .or_else(|| first_number(answer).and_then(validation::age_years));
        }
        ChecklistField::Height => {
            profile.height_cm = profile.height_cm.or_else(|| {
                first_number(answer)
                    .map(normalize_height)
                    .and_then(validation::height_cm)
            });
        }
        ChecklistField::Weight => {
            profile.weight_kg = profile
                .weight_kg
                .or_else(|| first_number(answer).and_then(validation::weight_kg));
        }
        ChecklistField::BodyFat => {
            profile.body_fat_pct = profile
                .body_fat_pct
                .or_else(|| first_number(answer).and_then(validation::body_fat_pct));
        }
        ChecklistField::Activity => {
            profile.activity_level = profile
                .activity_level
                .or_else(|| parse_activity_level(answer, true));
        }
    }
}

/// Whether an unlabeled answer has the bare shape of the field at its position
fn is_positional_answer(field: ChecklistField, answer: &str) -> bool {
    let words = answer.split_whitespace().count();
    match field {
        ChecklistField::Sex => words <= 2 && parse_sex(answer).is_some(),
        ChecklistField::Activity => words <= 4 && parse_activity_level(answer, true).is_some(),
        ChecklistField::Age
        | ChecklistField::Height
        | ChecklistField::Weight
        | ChecklistField::BodyFat => BARE_MEASURE_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(answer)),
    }
}

/// Profile fields answered in a numbered checklist message
///
/// Labeled answers are always read. Unlabeled answers are read by question
/// order only when they look like bare profile values and the message holds
/// at least two such answers, so numbered meal lists and clock times are
/// ignored.
#[must_use]
pub fn infer_from_checklist(text: &str) -> PhysicalProfile {
    let mut profile = PhysicalProfile::default();
    let Some(pattern) = CHECKLIST_LINE_PATTERN.as_ref() else {
        return profile;
    };
    let mut answers: Vec<(ChecklistField, String)> = Vec::new();
    for line in text.lines() {
        let line = normalize_text(line);
        let Some(caps) = pattern.captures(&line) else {
            continue;
        };
        let (Some(position), Some(answer)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let answer = answer.as_str();
        let field = ChecklistField::from_label(answer).or_else(|| {
            position
                .as_str()
                .parse::<u32>()
                .ok()
                .and_then(ChecklistField::from_position)
                .filter(|field| is_positional_answer(*field, answer))
        });
        if let Some(field) = field {
            answers.push((field, answer.to_owned()));
        }
    }
    if answers.len() < MIN_CHECKLIST_ANSWERS {
        return profile;
    }
    for (field, answer) in &answers {
        apply_checklist_answer(&mut profile, *field, answer);
    }
    profile
}

/// Profile fields mentioned anywhere in free text
#[must_use]
pub fn infer_from_free_text(text: &str) -> PhysicalProfile {
    let normalized = normalize_text(text);
    PhysicalProfile {
        sex: parse_sex(&normalized),
        age_years: first_group(&AGE_PATTERN, &normalized).and_then(validation::age_years),
        height_cm: first_group(&HEIGHT_PATTERN, &normalized)
            .map(normalize_height)
            .and_then(validation::height_cm),
        weight_kg: extract_weight_kg(&normalized),
        body_fat_pct: first_group(&BODY_FAT_PATTERN, &normalized).and_then(validation::body_fat_pct),
        activity_level: parse_activity_level(&normalized, false),
    }
}

/// Complete a profile from user messages given newest first
///
/// Known fields of `explicit` are never replaced. Checklist answers from any
/// message are applied before free-text mentions.
#[must_use]
pub fn infer_physical_profile<'a>(
    explicit: &PhysicalProfile,
    texts_newest_first: impl IntoIterator<Item = &'a str> + Clone,
) -> PhysicalProfile {
    let mut profile = explicit.clone();
    for text in texts_newest_first.clone() {
        profile.fill_missing_from(&infer_from_checklist(text));
    }
    for text in texts_newest_first {
        profile.fill_missing_from(&infer_from_free_text(text));
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_checklist() {
        let text = "1. Sexo: mujer\n2) Edad: 34\n3 - Altura: 1,65\n4. Peso: 62 kg\n5. Grasa: 24%\n6. Actividad: moderada";
        let profile = infer_from_checklist(text);
        assert_eq!(profile.sex, Some(Sex::Female));
        assert_eq!(profile.age_years, Some(34.0));
        assert_eq!(profile.height_cm, Some(165.0));
        assert_eq!(profile.weight_kg, Some(62.0));
        assert_eq!(profile.body_fat_pct, Some(24.0));
        assert_eq!(profile.activity_level, Some(ActivityLevel::Moderate));
    }

    #[test]
    fn test_positional_checklist() {
        let profile = infer_from_checklist("1. hombre\n2. 30\n3. 180\n4. 85");
        assert_eq!(profile.sex, Some(Sex::Male));
        assert_eq!(profile.age_years, Some(30.0));
        assert_eq!(profile.height_cm, Some(180.0));
        assert_eq!(profile.weight_kg, Some(85.0));
    }

    #[test]
    fn test_free_text_mentions() {
        let profile = infer_from_free_text("Tengo 40 años, mido 1.80 y peso 90 kg, 22% de grasa");
        assert_eq!(profile.age_years, Some(40.0));
        assert_eq!(profile.height_cm, Some(180.0));
        assert_eq!(profile.weight_kg, Some(90.0));
        assert_eq!(profile.body_fat_pct, Some(22.0));
    }

    #[test]
    fn test_out_of_range_dropped() {
        let profile = infer_from_checklist("2. 7\n4. 400");
        assert!(profile.age_years.is_none());
        assert!(profile.weight_kg.is_none());
    }

    #[test]
    fn test_priority_explicit_then_checklist_then_free_text() {
        let explicit = PhysicalProfile {
            weight_kg: Some(75.0),
            ..PhysicalProfile::default()
        };
        let messages = ["ahora peso 90 kg y tengo 41 años", "1. hombre\n2. 35\n4. 80"];
        let profile = infer_physical_profile(&explicit, messages);
        assert_eq!(profile.weight_kg, Some(75.0));
        assert_eq!(profile.age_years, Some(35.0));
        assert_eq!(profile.sex, Some(Sex::Male));
    }

    #[test]
    fn test_clock_times_are_not_checklist_answers() {
        assert!(infer_from_checklist("2:45 de natacion").is_empty());
        assert!(infer_from_checklist("entreno a las 7:30\n2:45 de natacion").is_empty());
    }

    #[test]
    fn test_numbered_meal_list_is_ignored() {
        let profile = infer_from_checklist("1. tostada\n2. 30 g de avena\n3. 150 g de pollo");
        assert!(profile.is_empty());
    }

    #[test]
    fn test_single_unlabeled_line_is_not_a_checklist() {
        assert!(infer_from_checklist("2. 45").is_empty());
    }

    #[test]
    fn test_checklist_beats_conflicting_free_text() {
        let messages = ["ya tengo 41 años y mido 1,70", "1. hombre\n2. 35\n3. 178 cm"];
        let profile = infer_physical_profile(&PhysicalProfile::default(), messages);
        assert_eq!(profile.age_years, Some(35.0));
        assert_eq!(profile.height_cm, Some(178.0));
    }

    #[test]
    fn test_stray_numbers_do_not_override_free_text() {
        let messages = ["tengo 34 años", "2:45 de natacion", "1. tostada\n2. 30 g de avena"];
        let profile = infer_physical_profile(&PhysicalProfile::default(), messages);
        assert_eq!(profile.age_years, Some(34.0));
        assert!(profile.height_cm.is_none());
    }
}
