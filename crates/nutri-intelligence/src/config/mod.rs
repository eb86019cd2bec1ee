// ABOUTME: Intelligence configuration for energy estimation and dashboard heuristics
// ABOUTME: Orchestrates domain configs and provides validation, env overrides, and a global instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Configuration is organized into domain-specific modules:
//! - `energy` - Basal/TDEE equations, activity factors, goal adjustments
//! - `dashboard` - Free-text heuristics (meal defaults, training assumptions)

pub mod dashboard;
pub mod energy;
pub mod error;

pub use dashboard::{DashboardConfig, MealDefaultsConfig};
pub use energy::{
    ActivityFactorsConfig, CunninghamConfig, EnergyConfig, GoalAdjustmentConfig, MifflinConfig,
};
pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig> = OnceLock::new();

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Energy model configuration
    pub energy: EnergyConfig,
    /// Dashboard heuristic configuration
    pub dashboard: DashboardConfig,
}

impl IntelligenceConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load intelligence config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every sub-configuration
    ///
    /// # Errors
    ///
    /// Returns the first validation failure
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.energy.validate()?;
        self.dashboard.validate()
    }

    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Energy model overrides
        Self::apply_env_var(
            "NUTRI_ENERGY_WEIGHT_ONLY_KCAL_PER_KG",
            &mut self.energy.weight_only_kcal_per_kg,
        )?;
        Self::apply_env_var(
            "NUTRI_ENERGY_GENERIC_DEFAULT_KCAL",
            &mut self.energy.generic_default_kcal,
        )?;
        Self::apply_env_var(
            "NUTRI_ENERGY_UNKNOWN_ACTIVITY_FACTOR",
            &mut self.energy.activity_factors.unknown,
        )?;
        Self::apply_env_var(
            "NUTRI_ENERGY_PROTEIN_G_PER_KG",
            &mut self.energy.protein_g_per_kg,
        )?;
        Self::apply_env_var(
            "NUTRI_GOAL_LOSE_FAT_ADJUSTMENT",
            &mut self.energy.goal_adjustments.lose_fat,
        )?;
        Self::apply_env_var(
            "NUTRI_GOAL_GAIN_MUSCLE_ADJUSTMENT",
            &mut self.energy.goal_adjustments.gain_muscle,
        )?;

        // Dashboard heuristic overrides
        Self::apply_env_var(
            "NUTRI_DASHBOARD_FALLBACK_WEIGHT_KG",
            &mut self.dashboard.fallback_body_weight_kg,
        )?;
        Self::apply_env_var(
            "NUTRI_DASHBOARD_DEFAULT_TRAINING_MINUTES",
            &mut self.dashboard.default_training_minutes,
        )?;
        Self::apply_env_var(
            "NUTRI_DASHBOARD_RECURRING_SESSION_MINUTES",
            &mut self.dashboard.recurring_session_minutes,
        )?;

        Ok(self)
    }
}
