// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Physiological ranges, schema versioning, ledger limits, and energy defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat list. Ranges are inclusive on both ends.

/// Physiological ranges used to validate profile fields
///
/// Values outside these ranges are dropped during normalization, never clamped.
pub mod ranges {
    use std::ops::RangeInclusive;

    /// Valid age range in years
    pub const AGE_YEARS: RangeInclusive<f64> = 12.0..=100.0;
    /// Valid body weight range in kilograms
    pub const WEIGHT_KG: RangeInclusive<f64> = 35.0..=250.0;
    /// Valid height range in centimeters
    pub const HEIGHT_CM: RangeInclusive<f64> = 120.0..=230.0;
    /// Valid body fat percentage range
    pub const BODY_FAT_PCT: RangeInclusive<f64> = 3.0..=60.0;
    /// Valid cognitive profile score range
    pub const COGNITIVE_SCORE: RangeInclusive<f64> = 0.0..=100.0;
    /// Valid meals-per-day preference range
    pub const MEALS_PER_DAY: RangeInclusive<f64> = 1.0..=8.0;
    /// Valid weekly training sessions goal range
    pub const WEEKLY_SESSIONS: RangeInclusive<f64> = 0.0..=21.0;
    /// Valid training session duration in minutes
    pub const SESSION_MINUTES: RangeInclusive<f64> = 5.0..=600.0;
    /// Valid daily energy figure (kcal) for any single day aggregate
    pub const DAY_KCAL: RangeInclusive<f64> = 0.0..=20_000.0;
    /// Valid grams for a single food entry
    pub const ENTRY_GRAMS: RangeInclusive<f64> = 0.0..=5_000.0;
}

/// Coach plan schema and signal limits
pub mod plan {
    /// Current schema version of the persisted coach plan
    pub const SCHEMA_VERSION: u32 = 3;
    /// Maximum number of unique food/activity labels kept in today's signals
    pub const MAX_TODAY_ITEMS: usize = 12;
    /// Timezone used when no valid timezone can be resolved
    pub const FALLBACK_TIMEZONE: &str = "UTC";
}

/// Food ledger limits
pub mod ledger {
    /// Maximum correction-chain depth walked when resolving supersession
    pub const MAX_CORRECTION_DEPTH: usize = 10;
}

/// Dashboard projection constants
pub mod dashboard {
    /// Number of days in the trailing window (index 6 is today)
    pub const WINDOW_DAYS: usize = 7;
}
