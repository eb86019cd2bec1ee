// ABOUTME: Heuristic defaults for the dashboard projection of free-text events
// ABOUTME: Meal-type kcal defaults, fallback body weight, and training duration assumptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Default kcal assumed for a food message with no explicit figure, by meal type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealDefaultsConfig {
    /// Breakfast ("desayuno")
    pub breakfast: f64,
    /// Lunch ("almuerzo", "comida")
    pub lunch: f64,
    /// Afternoon snack ("merienda")
    pub afternoon_snack: f64,
    /// Dinner ("cena")
    pub dinner: f64,
    /// Snack ("snack", "picoteo", "tentempie")
    pub snack: f64,
    /// Anything else
    pub other: f64,
}

impl Default for MealDefaultsConfig {
    fn default() -> Self {
        Self {
            breakfast: 400.0,
            lunch: 700.0,
            afternoon_snack: 250.0,
            dinner: 600.0,
            snack: 200.0,
            other: 500.0,
        }
    }
}

/// Dashboard heuristic configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Body weight used for MET estimates when none is known (kg)
    pub fallback_body_weight_kg: f64,
    /// Training duration assumed when a message names no duration (minutes)
    pub default_training_minutes: f64,
    /// Duration assumed for recurring sessions (minutes)
    pub recurring_session_minutes: f64,
    /// MET used for training messages naming no known activity
    pub default_met: f64,
    /// Meal-type defaults
    pub meal_defaults: MealDefaultsConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fallback_body_weight_kg: 70.0,
            default_training_minutes: 45.0,
            recurring_session_minutes: 60.0,
            default_met: 5.0,
            meal_defaults: MealDefaultsConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Validate that every assumption is positive
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for a non-positive value
    pub fn validate(&self) -> Result<(), ConfigError> {
        let meals = &self.meal_defaults;
        let values = [
            ("fallback_body_weight_kg", self.fallback_body_weight_kg),
            ("default_training_minutes", self.default_training_minutes),
            ("recurring_session_minutes", self.recurring_session_minutes),
            ("default_met", self.default_met),
            ("meal_defaults.breakfast", meals.breakfast),
            ("meal_defaults.lunch", meals.lunch),
            ("meal_defaults.afternoon_snack", meals.afternoon_snack),
            ("meal_defaults.dinner", meals.dinner),
            ("meal_defaults.snack", meals.snack),
            ("meal_defaults.other", meals.other),
        ];
        for (name, value) in values {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}
