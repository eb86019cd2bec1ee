// ABOUTME: Parses free-text Spanish food messages into food ledger mutations
// ABOUTME: Resolves the target day, correction intent, catalog item, and quantity of a message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food Entry Parser
//!
//! Turns messages such as "comi 2 huevos", "ayer comi pollo" or
//! "no eran 200 g de arroz, eran 150 g" into an `add` or `correct` mutation of
//! the food ledger. Anything the parser cannot ground in the catalog yields
//! [`ParsedFoodMutation::None`]; it never invents foods.
//!
//! Target day priority: "anteayer", "ayer", a named weekday ("el lunes",
//! "este lunes", "lunes"), an explicit date ("el 13/10", "13/10/25"), then
//! the current day. Habitual mentions ("los lunes") and bare fractions
//! ("1/2 pizza") never move the target day.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use nutri_core::constants::ranges;
use nutri_core::dates::{
    day_id_for_date, days_before, format_date, local_date, parse_day_id, previous_weekday,
    resolve_timezone,
};
use nutri_core::models::{DayOfWeek, FoodCatalogItem, FoodEntry, FoodSource};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::food_catalog::find_catalog_item_by_text;
use crate::food_ledger::{compute_from_catalog, find_last_matching_entry, FoodEntryOptions};
use crate::text::{normalize_text, parse_decimal, singular_forms, spanish_number};

static DAY_BEFORE_YESTERDAY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(?:anteayer|antier|antes de ayer)\b").ok());

static YESTERDAY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bayer\b").ok());

static WEEKDAY_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: el lunes, este sabado, el pasado martes, lunes; group 1 flags "los/cada lunes"
    Regex::new(
        r"\b(?:(los|cada)\s+)?(?:(?:el|este)\s+(?:pasado\s+)?)?(lunes|martes|miercoles|jueves|viernes|sabado|domingo)\b",
    )
    .ok()
});

static EXPLICIT_DATE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: el 13/10, dia 3/9, del 13/10/2025, 3/9/25; not "1/2 pizza"
    Regex::new(
        r"\b(?:(?:el|dia|del)\s+(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?|(\d{1,2})/(\d{1,2})/(\d{4}|\d{2}))\b",
    )
    .ok()
});

static CORRECTION_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b(?:corrige\w*|corregir|no eran?|eran|fueron|me equivoque|pon)\b").ok()
});

static GRAMS_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 150 g, 200gr, 80,5 gramos
    Regex::new(r"\b(\d+(?:[.,]\d+)?)\s*(?:g|gr|grs|gramos?)\b").ok()
});

static COUNT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 2 huevos, una manzana, dos rebanadas de pan
    Regex::new(
        r"\b(\d+(?:[.,]\d+)?|un|una|uno|dos|tres|cuatro|cinco|seis|siete|ocho|nueve|diez|once|doce)\s+(?:de\s+)?([a-z]+)",
    )
    .ok()
});

/// Whether retroactive weekday mentions need user confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodParserPolicy {
    /// Ask before writing to a day resolved from a weekday name
    pub confirm_weekday: bool,
}

impl Default for FoodParserPolicy {
    fn default() -> Self {
        Self {
            confirm_weekday: true,
        }
    }
}

/// Day a mutation applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDayContext {
    /// Day id of the target day
    pub day_id: String,
    /// Calendar date of the target day
    pub date_iso: String,
    /// Whether the target day precedes the current day
    pub is_retroactive: bool,
    /// Whether the caller should confirm before applying
    pub requires_confirmation: bool,
    /// Human label for the target day ("el lunes 13/10")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_label: Option<String>,
}

/// Ledger mutation parsed from a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParsedFoodMutation {
    /// Nothing to record
    None,
    /// New entry
    Add {
        /// Target day
        target: TargetDayContext,
        /// Entry to append
        entry: FoodEntry,
    },
    /// Correction of an earlier entry
    Correct {
        /// Target day
        target: TargetDayContext,
        /// Replacement entry, linked to the corrected one
        entry: FoodEntry,
        /// Id of the entry being corrected
        corrected_entry_id: String,
    },
}

impl ParsedFoodMutation {
    /// Whether the message produced no mutation
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// New entry carried by the mutation
    #[must_use]
    pub const fn entry(&self) -> Option<&FoodEntry> {
        match self {
            Self::None => None,
            Self::Add { entry, .. } | Self::Correct { entry, .. } => Some(entry),
        }
    }

    /// Target day of the mutation
    #[must_use]
    pub const fn target(&self) -> Option<&TargetDayContext> {
        match self {
            Self::None => None,
            Self::Add { target, .. } | Self::Correct { target, .. } => Some(target),
        }
    }

    /// Copy of the mutation with confirmation satisfied
    #[must_use]
    pub fn confirmed(mut self) -> Self {
        if let Self::Add { target, .. } | Self::Correct { target, .. } = &mut self {
            target.requires_confirmation = false;
        }
        self
    }
}

/// How the quantity of an entry was obtained
#[derive(Debug, Clone, PartialEq)]
enum Quantity {
    Grams(f64),
    Units { count: f64, unit: String, grams: f64 },
    DefaultServing(f64),
}

impl Quantity {
    const fn grams(&self) -> f64 {
        match self {
            Self::Grams(grams) | Self::Units { grams, .. } | Self::DefaultServing(grams) => *grams,
        }
    }

    const fn is_explicit(&self) -> bool {
        !matches!(self, Self::DefaultServing(_))
    }
}

fn today_context(current_day_id: &str, date: NaiveDate) -> TargetDayContext {
    TargetDayContext {
        day_id: current_day_id.to_owned(),
        date_iso: format_date(date),
        is_retroactive: false,
        requires_confirmation: false,
        confirmation_label: None,
    }
}

fn retro_context(
    date: NaiveDate,
    today: NaiveDate,
    current_day_id: &str,
    timezone: &str,
    label: String,
    requires_confirmation: bool,
) -> TargetDayContext {
    if date >= today {
        return today_context(current_day_id, today);
    }
    TargetDayContext {
        day_id: day_id_for_date(date, timezone),
        date_iso: format_date(date),
        is_retroactive: true,
        requires_confirmation,
        confirmation_label: Some(label),
    }
}

fn explicit_date(normalized: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = EXPLICIT_DATE_PATTERN.as_ref()?.captures(normalized)?;
    // Groups 1-3 hold "el dd/mm[/yy]", groups 4-6 a bare "dd/mm/yy"
    let offset = if caps.get(1).is_some() { 1 } else { 4 };
    let day: u32 = caps.get(offset)?.as_str().parse().ok()?;
    let month: u32 = caps.get(offset + 1)?.as_str().parse().ok()?;
    match caps.get(offset + 2) {
        Some(year) => {
            let year: i32 = year.as_str().parse().ok()?;
            let year = if year < 100 { 2000 + year } else { year };
            NaiveDate::from_ymd_opt(year, month, day)
        }
        None => {
            let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
            if this_year > today {
                NaiveDate::from_ymd_opt(today.year() - 1, month, day)
            } else {
                Some(this_year)
            }
        }
    }
}

/// Resolve which day a normalized message refers to
///
/// The current day comes from `current_day_id` when it parses, otherwise from
/// `now` in `timezone`. Dates that are not in the past resolve to the current day.
#[must_use]
pub fn resolve_target_day(
    normalized: &str,
    timezone: &str,
    current_day_id: &str,
    now: DateTime<Utc>,
    policy: FoodParserPolicy,
) -> TargetDayContext {
    let resolved_tz = resolve_timezone(timezone);
    let (today, tz_name) = parse_day_id(current_day_id)
        .unwrap_or_else(|| (local_date(now, resolved_tz.name()), resolved_tz.name()));
    let current_day_id = if parse_day_id(current_day_id).is_some() {
        current_day_id.to_owned()
    } else {
        day_id_for_date(today, tz_name)
    };
    let current_day_id = current_day_id.as_str();
    let short = |date: NaiveDate| date.format("%d/%m").to_string();

    if DAY_BEFORE_YESTERDAY_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(normalized))
    {
        let date = days_before(today, 2);
        return retro_context(date, today, current_day_id, tz_name, format!("anteayer {}", short(date)), false);
    }

    if YESTERDAY_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(normalized))
    {
        let date = days_before(today, 1);
        return retro_context(date, today, current_day_id, tz_name, format!("ayer {}", short(date)), false);
    }

    let weekday = WEEKDAY_PATTERN.as_ref().and_then(|pattern| {
        pattern
            .captures_iter(normalized)
            .filter(|caps| caps.get(1).is_none())
            .find_map(|caps| DayOfWeek::parse(caps.get(2)?.as_str()))
    });
    if let Some(day) = weekday {
        let date = previous_weekday(today, Weekday::from(day));
        let label = format!("el {} {}", day.spanish_name(), short(date));
        return retro_context(date, today, current_day_id, tz_name, label, policy.confirm_weekday);
    }

    if let Some(date) = explicit_date(normalized, today) {
        let label = format!("el {}", short(date));
        return retro_context(date, today, current_day_id, tz_name, label, false);
    }

    today_context(current_day_id, today)
}

fn explicit_grams(normalized: &str) -> Option<f64> {
    let caps = GRAMS_PATTERN.as_ref()?.captures(normalized)?;
    parse_decimal(caps.get(1)?.as_str())
        .filter(|grams| *grams > 0.0 && ranges::ENTRY_GRAMS.contains(grams))
}

fn unit_grams(item: &FoodCatalogItem, word: &str) -> Option<(String, f64)> {
    singular_forms(word).into_iter().find_map(|form| {
        if let Some(grams) = item.grams_per_unit(&form) {
            return Some((form, grams));
        }
        let is_generic_unit = form == "unidad" || form == "porcion" || form == "racion";
        let is_alias = item.aliases.iter().any(|alias| *alias == form);
        (is_generic_unit || is_alias).then(|| (form, item.default_serving_g))
    })
}

fn explicit_units(normalized: &str, item: &FoodCatalogItem) -> Option<Quantity> {
    let pattern = COUNT_PATTERN.as_ref()?;
    pattern.captures_iter(normalized).find_map(|caps| {
        let raw = caps.get(1)?.as_str();
        let count = parse_decimal(raw).or_else(|| spanish_number(raw).map(f64::from))?;
        if count <= 0.0 {
            return None;
        }
        let (unit, grams_per_unit) = unit_grams(item, caps.get(2)?.as_str())?;
        let grams = count * grams_per_unit;
        ranges::ENTRY_GRAMS
            .contains(&grams)
            .then_some(Quantity::Units { count, unit, grams })
    })
}

fn resolve_quantity(normalized: &str, item: &FoodCatalogItem) -> Quantity {
    explicit_grams(normalized)
        .map(Quantity::Grams)
        .or_else(|| explicit_units(normalized, item))
        .unwrap_or(Quantity::DefaultServing(item.default_serving_g))
}

fn quantity_options(item: &FoodCatalogItem, quantity: &Quantity, now: DateTime<Utc>) -> FoodEntryOptions {
    match quantity {
        Quantity::Grams(_) => FoodEntryOptions::new(FoodSource::User, now),
        Quantity::Units { count, unit, grams } => FoodEntryOptions::new(FoodSource::User, now)
            .with_note(format!("{count} {unit} de {} ≈ {grams} g", item.name)),
        Quantity::DefaultServing(grams) => FoodEntryOptions::new(FoodSource::Database, now)
            .estimated(format!("Porción estándar de {} ({grams} g)", item.name)),
    }
}

/// Whether a normalized message expresses a correction
#[must_use]
pub fn is_correction(normalized: &str) -> bool {
    CORRECTION_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(normalized))
}

/// Parse a message into a food ledger mutation
///
/// `existing_by_day` maps day ids to the entries already recorded on that day;
/// corrections target the most recent matching entry of the resolved day.
#[must_use]
pub fn parse_food_mutation(
    text: &str,
    timezone: &str,
    current_day_id: &str,
    now: DateTime<Utc>,
    existing_by_day: &BTreeMap<String, Vec<FoodEntry>>,
    policy: FoodParserPolicy,
) -> ParsedFoodMutation {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return ParsedFoodMutation::None;
    }

    let Some(item) = find_catalog_item_by_text(&normalized) else {
        return ParsedFoodMutation::None;
    };
    let target = resolve_target_day(&normalized, timezone, current_day_id, now, policy);
    let quantity = resolve_quantity(&normalized, item);

    if is_correction(&normalized) {
        let day_entries = existing_by_day
            .get(&target.day_id)
            .map_or(&[][..], Vec::as_slice);
        let Some(previous) = find_last_matching_entry(day_entries, Some(&item.id))
            .or_else(|| find_last_matching_entry(day_entries, Some(&item.name)))
        else {
            debug!(day_id = %target.day_id, item = %item.id, "Correction without a target entry");
            return ParsedFoodMutation::None;
        };

        let (grams, mut options) = if quantity.is_explicit() {
            (quantity.grams(), quantity_options(item, &quantity, now))
        } else {
            let mut options = FoodEntryOptions::new(previous.source, now);
            options.is_estimated = previous.is_estimated;
            options.assumption_note.clone_from(&previous.assumption_note);
            (previous.grams, options)
        };
        options = options.linked_to(previous.id.clone());
        let entry = compute_from_catalog(item, grams, options);
        debug!(day_id = %target.day_id, corrected = %previous.id, grams, "Parsed food correction");
        return ParsedFoodMutation::Correct {
            target,
            entry,
            corrected_entry_id: previous.id,
        };
    }

    let entry = compute_from_catalog(item, quantity.grams(), quantity_options(item, &quantity, now));
    debug!(day_id = %target.day_id, item = %item.id, grams = entry.grams, "Parsed food addition");
    ParsedFoodMutation::Add { target, entry }
}

/// Append the mutation's entry to `entries`
///
/// Existing entries are never modified; a `none` mutation returns them unchanged.
#[must_use]
pub fn merge_food_entries(entries: &[FoodEntry], mutation: &ParsedFoodMutation) -> Vec<FoodEntry> {
    let mut merged = entries.to_vec();
    if let Some(entry) = mutation.entry() {
        if !merged.iter().any(|existing| existing.id == entry.id) {
            merged.push(entry.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const TZ: &str = "Europe/Madrid";

    fn now() -> DateTime<Utc> {
        // Tuesday 2025-10-14, 10:00 UTC (12:00 in Madrid)
        Utc.with_ymd_and_hms(2025, 10, 14, 10, 0, 0).unwrap()
    }

    fn today_id() -> String {
        "2025-10-14@Europe/Madrid".to_owned()
    }

    fn parse(text: &str) -> ParsedFoodMutation {
        parse_food_mutation(text, TZ, &today_id(), now(), &BTreeMap::new(), FoodParserPolicy::default())
    }

    #[test]
    fn test_two_eggs_today() {
        let mutation = parse("comi 2 huevos");
        let ParsedFoodMutation::Add { target, entry } = mutation else {
            panic!("expected add");
        };
        assert_eq!(target.day_id, today_id());
        assert!(!target.is_retroactive);
        assert!((entry.grams - 120.0).abs() < f64::EPSILON);
        assert!((entry.kcal - 172.0).abs() < f64::EPSILON);
        assert_eq!(entry.source, FoodSource::User);
        assert!(!entry.is_estimated);
    }

    #[test]
    fn test_yesterday_default_serving() {
        let ParsedFoodMutation::Add { target, entry } = parse("ayer comi pollo") else {
            panic!("expected add");
        };
        assert_eq!(target.day_id, "2025-10-13@Europe/Madrid");
        assert!(target.is_retroactive);
        assert!((entry.grams - 150.0).abs() < f64::EPSILON);
        assert!(entry.is_estimated);
        assert_eq!(entry.source, FoodSource::Database);
        assert!(entry.assumption_note.is_some());
    }

    #[test]
    fn test_day_before_yesterday_wins_over_yesterday() {
        let target = parse("anteayer cene pizza").target().cloned().unwrap();
        assert_eq!(target.date_iso, "2025-10-12");
    }

    #[test]
    fn test_weekday_requires_confirmation() {
        let target = parse("el lunes comi arroz").target().cloned().unwrap();
        assert_eq!(target.date_iso, "2025-10-13");
        assert!(target.requires_confirmation);
        assert_eq!(target.confirmation_label.as_deref(), Some("el lunes 13/10"));

        let relaxed = parse_food_mutation(
            "el lunes comi arroz",
            TZ,
            &today_id(),
            now(),
            &BTreeMap::new(),
            FoodParserPolicy { confirm_weekday: false },
        );
        assert!(!relaxed.target().unwrap().requires_confirmation);
    }

    #[test]
    fn test_same_weekday_goes_back_a_week() {
        let target = parse("el martes comi arroz").target().cloned().unwrap();
        assert_eq!(target.date_iso, "2025-10-07");
    }

    #[test]
    fn test_explicit_date() {
        let target = parse("el 10/10 comi 200 g de arroz").target().cloned().unwrap();
        assert_eq!(target.date_iso, "2025-10-10");
        assert!(target.is_retroactive);
    }

    #[test]
    fn test_explicit_date_with_year_needs_no_article() {
        let target = parse("13/10/25 comi arroz").target().cloned().unwrap();
        assert_eq!(target.date_iso, "2025-10-13");
    }

    #[test]
    fn test_fraction_is_not_a_date() {
        let target = parse("comi 1/2 pizza").target().cloned().unwrap();
        assert_eq!(target.day_id, today_id());
        assert!(!target.is_retroactive);
    }

    #[test]
    fn test_weekday_forms() {
        for text in [
            "lunes comi arroz",
            "este lunes comi arroz",
            "el lunes pasado comi arroz",
            "el pasado lunes comi arroz",
        ] {
            let target = parse(text).target().cloned().unwrap();
            assert_eq!(target.date_iso, "2025-10-13", "{text}");
            assert!(target.requires_confirmation, "{text}");
        }
    }

    #[test]
    fn test_habitual_weekday_stays_today() {
        let target = parse("los lunes como arroz").target().cloned().unwrap();
        assert_eq!(target.day_id, today_id());
    }

    #[test]
    fn test_explicit_grams_take_priority() {
        let entry = parse("comi 200 g de arroz").entry().cloned().unwrap();
        assert!((entry.grams - 200.0).abs() < f64::EPSILON);
        assert!((entry.kcal - 260.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unit_words() {
        let entry = parse("desayune dos rebanadas de pan").entry().cloned().unwrap();
        assert!((entry.grams - 60.0).abs() < f64::EPSILON);
        let entry = parse("un vaso de leche").entry().cloned().unwrap();
        assert!((entry.grams - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_food_is_none() {
        assert!(parse("hoy entrene piernas").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn test_correction_links_previous_entry() {
        let ParsedFoodMutation::Add { entry: original, .. } = parse("comi 200 g de arroz") else {
            panic!("expected add");
        };
        let mut existing = BTreeMap::new();
        existing.insert(today_id(), vec![original.clone()]);
        let later = now() + Duration::minutes(5);
        let mutation = parse_food_mutation(
            "me equivoque, eran 150 g de arroz",
            TZ,
            &today_id(),
            later,
            &existing,
            FoodParserPolicy::default(),
        );
        let ParsedFoodMutation::Correct { entry, corrected_entry_id, .. } = mutation else {
            panic!("expected correct");
        };
        assert_eq!(corrected_entry_id, original.id);
        assert_eq!(entry.linked_entry_id.as_deref(), Some(original.id.as_str()));
        assert!((entry.grams - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_correction_without_target_is_none() {
        assert!(parse("corrige el arroz, eran 100 g").is_none());
    }

    #[test]
    fn test_merge_appends_without_mutating() {
        let mutation = parse("comi 2 huevos");
        let merged = merge_food_entries(&[], &mutation);
        assert_eq!(merged.len(), 1);
        let again = merge_food_entries(&merged, &mutation);
        assert_eq!(again.len(), 1);
        assert_eq!(merge_food_entries(&merged, &ParsedFoodMutation::None), merged);
    }
}
