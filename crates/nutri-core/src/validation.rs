// ABOUTME: Small composable field validators shared by normalization, merging, and inference
// ABOUTME: Each validator returns Option so invalid values are dropped rather than clamped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Field validators.
//!
//! A value outside its range is dropped (`None`), never clamped into range.

use std::ops::RangeInclusive;

use crate::constants::ranges;

/// Keep a finite value that lies within `range`
#[must_use]
pub fn in_range(value: f64, range: &RangeInclusive<f64>) -> Option<f64> {
    (value.is_finite() && range.contains(&value)).then_some(value)
}

/// Validate an age in years
#[must_use]
pub fn age_years(value: f64) -> Option<f64> {
    in_range(value, &ranges::AGE_YEARS)
}

/// Validate a body weight in kilograms
#[must_use]
pub fn weight_kg(value: f64) -> Option<f64> {
    in_range(value, &ranges::WEIGHT_KG)
}

/// Validate a height in centimeters
#[must_use]
pub fn height_cm(value: f64) -> Option<f64> {
    in_range(value, &ranges::HEIGHT_CM)
}

/// Validate a body fat percentage
#[must_use]
pub fn body_fat_pct(value: f64) -> Option<f64> {
    in_range(value, &ranges::BODY_FAT_PCT)
}

/// Validate a cognitive score
#[must_use]
pub fn cognitive_score(value: f64) -> Option<f64> {
    in_range(value, &ranges::COGNITIVE_SCORE)
}

/// Validate a per-day kcal aggregate
#[must_use]
pub fn day_kcal(value: f64) -> Option<f64> {
    in_range(value, &ranges::DAY_KCAL)
}

/// Validate a session duration in minutes
#[must_use]
pub fn session_minutes(value: f64) -> Option<f64> {
    in_range(value, &ranges::SESSION_MINUTES)
}

/// Validate a whole count within `range`
#[must_use]
pub fn count_in_range(value: f64, range: &RangeInclusive<f64>) -> Option<u32> {
    in_range(value, range)
        .filter(|v| v.fract() == 0.0)
        .map(|v| v as u32)
}

/// Trim a string and drop it when empty
#[must_use]
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
