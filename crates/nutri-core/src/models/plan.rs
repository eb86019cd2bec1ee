// ABOUTME: Coach plan aggregate models - profile, goals, routines, signals, and day history
// ABOUTME: Defines the persisted per-user state and the partial patch merged by the plan store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::food::FoodEntry;
use crate::constants::plan::SCHEMA_VERSION;

/// Biological sex used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
}

impl Sex {
    /// Parse from persisted or conversational spellings
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" | "hombre" | "varon" | "varón" | "masculino" => Some(Self::Male),
            "female" | "f" | "mujer" | "femenino" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Habitual activity level driving the TDEE activity factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise 1-3 days/week
    Light,
    /// Exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    VeryActive,
}

impl ActivityLevel {
    /// Parse from persisted spellings (`very_active`, `very-active`, `veryActive`, ...)
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let key: String = value
            .trim()
            .to_lowercase()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        match key.as_str() {
            "sedentary" | "sedentario" => Some(Self::Sedentary),
            "light" | "lightlyactive" | "ligero" => Some(Self::Light),
            "moderate" | "moderatelyactive" | "moderado" => Some(Self::Moderate),
            "veryactive" | "active" | "muyactivo" => Some(Self::VeryActive),
            _ => None,
        }
    }
}

/// Self-reported technical literacy about nutrition/training
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalLevel {
    /// Plain language only
    #[default]
    Basic,
    /// Comfortable with common terms
    Intermediate,
    /// Comfortable with numbers and jargon
    Advanced,
}

impl TechnicalLevel {
    /// Parse from persisted spelling
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "basic" | "basico" | "low" => Some(Self::Basic),
            "intermediate" | "intermedio" | "medium" => Some(Self::Intermediate),
            "advanced" | "avanzado" | "high" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Preferred coaching tone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneStyle {
    /// Friendly and encouraging
    #[default]
    Warm,
    /// Straight to the point
    Direct,
    /// High energy
    Motivational,
    /// Data-first
    Analytical,
}

impl ToneStyle {
    /// Parse from persisted spelling
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "warm" | "cercano" => Some(Self::Warm),
            "direct" | "directo" => Some(Self::Direct),
            "motivational" | "motivador" => Some(Self::Motivational),
            "analytical" | "analitico" => Some(Self::Analytical),
            _ => None,
        }
    }
}

/// Preferred reply length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailPreference {
    /// One or two sentences
    Brief,
    /// Default
    #[default]
    Balanced,
    /// Full breakdowns
    Detailed,
}

impl DetailPreference {
    /// Parse from persisted spelling
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "brief" | "breve" | "short" => Some(Self::Brief),
            "balanced" | "normal" => Some(Self::Balanced),
            "detailed" | "detallado" | "long" => Some(Self::Detailed),
            _ => None,
        }
    }
}

/// Primary coaching goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    /// Reduce body fat (caloric deficit)
    LoseFat,
    /// Keep current weight
    Maintain,
    /// Build muscle (caloric surplus)
    GainMuscle,
    /// Sport performance
    Performance,
    /// General health
    Health,
}

impl GoalKind {
    /// Parse from persisted spelling
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let key: String = value
            .trim()
            .to_lowercase()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        match key.as_str() {
            "losefat" | "weightloss" | "perdergrasa" | "adelgazar" => Some(Self::LoseFat),
            "maintain" | "maintenance" | "mantener" => Some(Self::Maintain),
            "gainmuscle" | "musclegain" | "ganarmusculo" => Some(Self::GainMuscle),
            "performance" | "rendimiento" => Some(Self::Performance),
            "health" | "salud" => Some(Self::Health),
            _ => None,
        }
    }
}

/// Day of the week, persisted in lowercase English
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl DayOfWeek {
    /// Parse English or Spanish (accent-insensitive) weekday names
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "monday" | "mon" | "lunes" => Some(Self::Monday),
            "tuesday" | "tue" | "martes" => Some(Self::Tuesday),
            "wednesday" | "wed" | "miercoles" | "miércoles" => Some(Self::Wednesday),
            "thursday" | "thu" | "jueves" => Some(Self::Thursday),
            "friday" | "fri" | "viernes" => Some(Self::Friday),
            "saturday" | "sat" | "sabado" | "sábado" => Some(Self::Saturday),
            "sunday" | "sun" | "domingo" => Some(Self::Sunday),
            _ => None,
        }
    }

    /// Spanish display name
    #[must_use]
    pub const fn spanish_name(self) -> &'static str {
        match self {
            Self::Monday => "lunes",
            Self::Tuesday => "martes",
            Self::Wednesday => "miércoles",
            Self::Thursday => "jueves",
            Self::Friday => "viernes",
            Self::Saturday => "sábado",
            Self::Sunday => "domingo",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Self::Mon,
            DayOfWeek::Tuesday => Self::Tue,
            DayOfWeek::Wednesday => Self::Wed,
            DayOfWeek::Thursday => Self::Thu,
            DayOfWeek::Friday => Self::Fri,
            DayOfWeek::Saturday => Self::Sat,
            DayOfWeek::Sunday => Self::Sun,
        }
    }
}

/// Calendar bookkeeping for the active day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTime {
    /// Day id of the active day
    pub current_day_id: String,
    /// Timestamp of the last rotation (or seeding)
    pub last_rotation_iso: String,
    /// IANA timezone the day id was computed in
    pub timezone: String,
}

/// Physical profile; every field is independently optional and range-validated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalProfile {
    /// Biological sex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_years: Option<f64>,
    /// Height in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Body fat percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_pct: Option<f64>,
    /// Habitual activity level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
}

impl PhysicalProfile {
    /// Whether no field is known
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sex.is_none()
            && self.age_years.is_none()
            && self.height_cm.is_none()
            && self.weight_kg.is_none()
            && self.body_fat_pct.is_none()
            && self.activity_level.is_none()
    }

    /// Whether any numeric physiological input is known
    #[must_use]
    pub const fn has_physiological_data(&self) -> bool {
        self.age_years.is_some()
            || self.height_cm.is_some()
            || self.weight_kg.is_some()
            || self.body_fat_pct.is_some()
    }

    /// Fill fields that are still unknown from `other`, never overwriting known ones
    pub fn fill_missing_from(&mut self, other: &Self) {
        self.sex = self.sex.or(other.sex);
        self.age_years = self.age_years.or(other.age_years);
        self.height_cm = self.height_cm.or(other.height_cm);
        self.weight_kg = self.weight_kg.or(other.weight_kg);
        self.body_fat_pct = self.body_fat_pct.or(other.body_fat_pct);
        self.activity_level = self.activity_level.or(other.activity_level);
    }
}

/// Communication-style profile, always present with defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveProfile {
    /// Technical literacy
    pub technical_level: TechnicalLevel,
    /// Numeric literacy score (0-100)
    pub score: f64,
    /// Preferred tone
    pub tone_style: ToneStyle,
    /// Preferred detail level
    pub detail_preference: DetailPreference,
}

impl Default for CognitiveProfile {
    fn default() -> Self {
        Self {
            technical_level: TechnicalLevel::default(),
            score: 50.0,
            tone_style: ToneStyle::default(),
            detail_preference: DetailPreference::default(),
        }
    }
}

/// Partial update of the cognitive profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveProfilePatch {
    /// Technical literacy
    #[serde(default)]
    pub technical_level: Option<TechnicalLevel>,
    /// Numeric literacy score
    #[serde(default)]
    pub score: Option<f64>,
    /// Preferred tone
    #[serde(default)]
    pub tone_style: Option<ToneStyle>,
    /// Preferred detail level
    #[serde(default)]
    pub detail_preference: Option<DetailPreference>,
}

/// Coaching goals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    /// Primary goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<GoalKind>,
    /// Target weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    /// Desired training sessions per week
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_training_sessions: Option<u32>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Dietary and conversational preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Reply language (BCP 47)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Dietary restrictions (vegetarian, gluten-free, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_restrictions: Vec<String>,
    /// Foods the user does not want suggested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disliked_foods: Vec<String>,
    /// Preferred number of meals per day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meals_per_day: Option<u32>,
}

/// Recurring weekly training entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRoutineEntry {
    /// Weekday the session happens on
    pub weekday: DayOfWeek,
    /// Activity name ("tenis", "correr", ...)
    pub activity: String,
    /// Session duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<f64>,
    /// Known energy burn for the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kcal: Option<f64>,
}

/// Routines container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routines {
    /// Weekly recurring training
    #[serde(default)]
    pub weekly: Vec<WeeklyRoutineEntry>,
}

/// Last generated textual weekly plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    /// Plan text
    pub text: String,
    /// Monday of the planned week (`YYYY-MM-DD`)
    pub week_start_iso: String,
    /// Generation timestamp
    pub generated_at_iso: String,
}

/// Macro totals attached to signals and snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroTotals {
    /// Protein (g)
    pub protein_g: f64,
    /// Carbohydrates (g)
    pub carbs_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Fiber (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
}

/// Live running totals for the active day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySignals {
    /// Day id these signals belong to
    pub day_id: String,
    /// Energy in (kcal)
    pub kcal_in: f64,
    /// Energy out from training (kcal)
    pub kcal_out: f64,
    /// Macro totals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<MacroTotals>,
    /// Weight reported today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Food labels mentioned today (unique, most recent last)
    #[serde(default)]
    pub foods: Vec<String>,
    /// Activity labels mentioned today (unique, most recent last)
    #[serde(default)]
    pub activities: Vec<String>,
    /// Structured food ledger for today
    #[serde(default)]
    pub food_entries: Vec<FoodEntry>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl TodaySignals {
    /// Fresh empty signals for a day
    #[must_use]
    pub fn empty(day_id: impl Into<String>) -> Self {
        Self {
            day_id: day_id.into(),
            ..Self::default()
        }
    }

    /// Whether anything was recorded for the day
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.kcal_in > 0.0
            || self.kcal_out > 0.0
            || self.weight_kg.is_some()
            || !self.foods.is_empty()
            || !self.activities.is_empty()
            || !self.food_entries.is_empty()
    }
}

/// Partial update of today's signals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySignalsPatch {
    /// Energy in (kcal)
    #[serde(default)]
    pub kcal_in: Option<f64>,
    /// Energy out (kcal)
    #[serde(default)]
    pub kcal_out: Option<f64>,
    /// Macro totals
    #[serde(default)]
    pub macros: Option<MacroTotals>,
    /// Weight (kg)
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Food labels to union in
    #[serde(default)]
    pub foods: Vec<String>,
    /// Activity labels to union in
    #[serde(default)]
    pub activities: Vec<String>,
    /// Ledger entries to union in (by id)
    #[serde(default)]
    pub food_entries: Vec<FoodEntry>,
}

/// Signals container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signals {
    /// The single active day
    pub today: TodaySignals,
}

/// Closed or active day aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySnapshot {
    /// Day id
    pub day_id: String,
    /// Calendar date (`YYYY-MM-DD`)
    pub date_iso: String,
    /// Timezone of the day id
    pub timezone: String,
    /// Energy in (kcal)
    pub kcal_in: f64,
    /// Energy out (kcal)
    pub kcal_out: f64,
    /// `kcal_in - kcal_out`
    pub balance: f64,
    /// Macro totals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<MacroTotals>,
    /// Micronutrient totals by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micros: Option<BTreeMap<String, f64>>,
    /// Weight reported that day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Structured food ledger for the day
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub food_entries: Vec<FoodEntry>,
    /// Food labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foods: Vec<String>,
    /// Activity labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<String>,
    /// Whether the day was closed by a rollover
    #[serde(default)]
    pub closed: bool,
    /// Whether the day was corrected after closing
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub auto_reopened: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Historical day snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    /// Snapshots keyed by day id
    #[serde(default)]
    pub days: BTreeMap<String, DaySnapshot>,
}

/// Schema bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    /// Schema version, monotonically non-decreasing
    pub version: u32,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Default for PlanMetadata {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Root per-user aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachPlan {
    /// Active-day bookkeeping; absent until first seeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<PlanTime>,
    /// Physical profile
    #[serde(default)]
    pub physical_profile: PhysicalProfile,
    /// Communication-style profile
    #[serde(default)]
    pub cognitive_profile: CognitiveProfile,
    /// Goals
    #[serde(default)]
    pub goals: Goals,
    /// Preferences
    #[serde(default)]
    pub preferences: Preferences,
    /// Routines
    #[serde(default)]
    pub routines: Routines,
    /// Last generated weekly plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_plan: Option<WeeklyPlan>,
    /// Live signals
    #[serde(default)]
    pub signals: Signals,
    /// Day history
    #[serde(default)]
    pub history: History,
    /// Schema bookkeeping
    #[serde(default)]
    pub metadata: PlanMetadata,
}

impl CoachPlan {
    /// Timezone of the active day, if seeded
    #[must_use]
    pub fn timezone(&self) -> Option<&str> {
        self.time.as_ref().map(|time| time.timezone.as_str())
    }

    /// Day id of the active day, if seeded
    #[must_use]
    pub fn current_day_id(&self) -> Option<&str> {
        self.time.as_ref().map(|time| time.current_day_id.as_str())
    }

    /// Food entries recorded for a day, live or historical
    #[must_use]
    pub fn food_entries_for_day(&self, day_id: &str) -> &[FoodEntry] {
        if self.signals.today.day_id == day_id {
            return &self.signals.today.food_entries;
        }
        self.history
            .days
            .get(day_id)
            .map_or(&[][..], |snapshot| snapshot.food_entries.as_slice())
    }

    /// Food entries grouped by day id across live signals and history
    #[must_use]
    pub fn food_entries_by_day(&self) -> BTreeMap<String, Vec<FoodEntry>> {
        let mut by_day: BTreeMap<String, Vec<FoodEntry>> = self
            .history
            .days
            .iter()
            .filter(|(_, snapshot)| !snapshot.food_entries.is_empty())
            .map(|(day_id, snapshot)| (day_id.clone(), snapshot.food_entries.clone()))
            .collect();
        if !self.signals.today.day_id.is_empty() && !self.signals.today.food_entries.is_empty() {
            by_day.insert(
                self.signals.today.day_id.clone(),
                self.signals.today.food_entries.clone(),
            );
        }
        by_day
    }
}

/// Partial update merged onto a plan by the store
///
/// Every section is optional; present sections merge field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachPlanPatch {
    /// Replacement time bookkeeping
    #[serde(default)]
    pub time: Option<PlanTime>,
    /// Physical profile fields to set
    #[serde(default)]
    pub physical_profile: Option<PhysicalProfile>,
    /// Cognitive profile fields to set
    #[serde(default)]
    pub cognitive_profile: Option<CognitiveProfilePatch>,
    /// Goal fields to set
    #[serde(default)]
    pub goals: Option<Goals>,
    /// Preference fields to set
    #[serde(default)]
    pub preferences: Option<Preferences>,
    /// Replacement routines
    #[serde(default)]
    pub routines: Option<Routines>,
    /// Replacement weekly plan
    #[serde(default)]
    pub weekly_plan: Option<WeeklyPlan>,
    /// Today's signal updates
    #[serde(default)]
    pub signals_today: Option<TodaySignalsPatch>,
    /// Snapshots to union into history (right-hand precedence)
    #[serde(default)]
    pub history_days: BTreeMap<String, DaySnapshot>,
    /// Schema version proposed by the caller
    #[serde(default)]
    pub version: Option<u32>,
}

impl CoachPlanPatch {
    /// Patch touching only the physical profile
    #[must_use]
    pub fn physical(profile: PhysicalProfile) -> Self {
        Self {
            physical_profile: Some(profile),
            ..Self::default()
        }
    }

    /// Patch touching only today's signals
    #[must_use]
    pub fn signals(signals: TodaySignalsPatch) -> Self {
        Self {
            signals_today: Some(signals),
            ..Self::default()
        }
    }
}
