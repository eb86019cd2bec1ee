// ABOUTME: Energy model configuration for basal and total expenditure estimation
// ABOUTME: Cunningham/Mifflin coefficients, fallback heuristics, activity factors, goal adjustments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Energy Model Configuration
//!
//! # Scientific References
//!
//! - Cunningham, J.J. (1980). A reanalysis of the factors influencing basal
//!   metabolic rate in normal adults. *Am J Clin Nutr*, 33(11), 2372-2374.
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy
//!   expenditure. *Am J Clin Nutr*, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
//! - `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology

use nutri_core::models::{ActivityLevel, GoalKind};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Cunningham equation coefficients (basal = intercept + coef x lean mass)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CunninghamConfig {
    /// Intercept (500)
    pub intercept: f64,
    /// Lean body mass coefficient (22)
    pub lean_mass_coef: f64,
}

impl Default for CunninghamConfig {
    fn default() -> Self {
        Self {
            intercept: 500.0,
            lean_mass_coef: 22.0,
        }
    }
}

/// Mifflin-St Jeor coefficients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MifflinConfig {
    /// Weight coefficient (10.0)
    pub weight_coef: f64,
    /// Height coefficient (6.25)
    pub height_coef: f64,
    /// Age coefficient (-5.0)
    pub age_coef: f64,
    /// Male constant (+5)
    pub male_constant: f64,
    /// Female constant (-161)
    pub female_constant: f64,
}

impl Default for MifflinConfig {
    fn default() -> Self {
        Self {
            weight_coef: 10.0,
            height_coef: 6.25,
            age_coef: -5.0,
            male_constant: 5.0,
            female_constant: -161.0,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Light: 1.375
    pub light: f64,
    /// Moderate: 1.55
    pub moderate: f64,
    /// Very active: 1.725
    pub very_active: f64,
    /// Used when the activity level is unknown: 1.35
    pub unknown: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            very_active: 1.725,
            unknown: 1.35,
        }
    }
}

impl ActivityFactorsConfig {
    /// Factor for an optional activity level
    #[must_use]
    pub const fn factor(&self, level: Option<ActivityLevel>) -> f64 {
        match level {
            Some(ActivityLevel::Sedentary) => self.sedentary,
            Some(ActivityLevel::Light) => self.light,
            Some(ActivityLevel::Moderate) => self.moderate,
            Some(ActivityLevel::VeryActive) => self.very_active,
            None => self.unknown,
        }
    }
}

/// Daily kcal target adjustment per goal, as a fraction of TDEE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAdjustmentConfig {
    /// Fat loss: -0.15
    pub lose_fat: f64,
    /// Muscle gain: +0.10
    pub gain_muscle: f64,
    /// Any other goal: 0.0
    pub other: f64,
}

impl Default for GoalAdjustmentConfig {
    fn default() -> Self {
        Self {
            lose_fat: -0.15,
            gain_muscle: 0.10,
            other: 0.0,
        }
    }
}

impl GoalAdjustmentConfig {
    /// Adjustment fraction for an optional goal
    #[must_use]
    pub const fn for_goal(&self, goal: Option<GoalKind>) -> f64 {
        match goal {
            Some(GoalKind::LoseFat) => self.lose_fat,
            Some(GoalKind::GainMuscle) => self.gain_muscle,
            _ => self.other,
        }
    }
}

/// Energy model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyConfig {
    /// Cunningham coefficients
    pub cunningham: CunninghamConfig,
    /// Mifflin-St Jeor coefficients
    pub mifflin: MifflinConfig,
    /// Weight-only basal heuristic (kcal per kg): 22
    pub weight_only_kcal_per_kg: f64,
    /// Generic daily default when nothing is known (kcal): 1800
    pub generic_default_kcal: f64,
    /// Activity factors
    pub activity_factors: ActivityFactorsConfig,
    /// Goal adjustments
    pub goal_adjustments: GoalAdjustmentConfig,
    /// Daily protein target (g per kg body weight): 1.6
    pub protein_g_per_kg: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            cunningham: CunninghamConfig::default(),
            mifflin: MifflinConfig::default(),
            weight_only_kcal_per_kg: 22.0,
            generic_default_kcal: 1800.0,
            activity_factors: ActivityFactorsConfig::default(),
            goal_adjustments: GoalAdjustmentConfig::default(),
            protein_g_per_kg: 1.6,
        }
    }
}

impl EnergyConfig {
    /// Validate factor ordering and plausible bounds
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if activity factors are not ascending or a value is implausible
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factors = &self.activity_factors;
        if !(factors.sedentary < factors.light
            && factors.light < factors.moderate
            && factors.moderate < factors.very_active)
        {
            return Err(ConfigError::InvalidRange(
                "activity factors must be ascending from sedentary to very_active",
            ));
        }
        for (name, value) in [
            ("sedentary", factors.sedentary),
            ("very_active", factors.very_active),
            ("unknown", factors.unknown),
        ] {
            if !(1.0..=2.5).contains(&value) {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "activity factor {name} must be between 1.0 and 2.5, got {value}"
                )));
            }
        }
        if self.generic_default_kcal <= 0.0 || self.weight_only_kcal_per_kg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "fallback energy values must be positive".to_owned(),
            ));
        }
        let goals = &self.goal_adjustments;
        for (name, value) in [
            ("lose_fat", goals.lose_fat),
            ("gain_muscle", goals.gain_muscle),
            ("other", goals.other),
        ] {
            if !(-0.5..=0.5).contains(&value) {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "goal adjustment {name} must be between -0.5 and 0.5, got {value}"
                )));
            }
        }
        Ok(())
    }
}
