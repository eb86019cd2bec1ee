// ABOUTME: Basal and total daily energy expenditure estimation with a confidence cascade
// ABOUTME: Cunningham (lean mass) > Mifflin-St Jeor > weight-only heuristic > generic default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Energy Model
//!
//! The most specific equation the profile supports is used, and the result
//! carries a confidence tier naming how much of the profile was known:
//!
//! | Inputs                          | Method          | Confidence |
//! |---------------------------------|-----------------|------------|
//! | weight + body fat               | Cunningham      | high       |
//! | sex + age + height + weight     | Mifflin-St Jeor | medium     |
//! | weight                          | 22 kcal/kg      | low        |
//! | nothing                         | 1800 kcal       | none       |
//!
//! TDEE is the rounded basal rate times the activity factor, rounded again.
//! A daily target is only offered when confidence is above `none`.

use nutri_core::models::{GoalKind, PhysicalProfile, Sex};
use serde::{Deserialize, Serialize};

use crate::config::{CunninghamConfig, EnergyConfig, MifflinConfig};

/// Equation used for the basal estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyMethod {
    /// 500 + 22 x lean body mass
    Cunningham,
    /// 10w + 6.25h - 5a + s
    MifflinStJeor,
    /// Body weight x kcal/kg heuristic
    WeightOnly,
    /// Generic population default
    GenericDefault,
}

/// Confidence tier of an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Nothing known
    None,
    /// Weight only
    Low,
    /// Full anthropometrics without composition
    Medium,
    /// Body composition known
    High,
}

/// Energy expenditure estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyModel {
    /// Basal metabolic rate (kcal/day)
    pub basal_kcal: Option<f64>,
    /// Total daily energy expenditure (kcal/day)
    pub tdee_kcal: Option<f64>,
    /// Activity factor applied
    pub activity_factor: f64,
    /// Equation used
    pub method: EnergyMethod,
    /// Confidence tier
    pub confidence: Confidence,
}

impl EnergyModel {
    /// Daily kcal target for `goal`
    ///
    /// Returns `None` when confidence is `none` or there is no meaningful data.
    #[must_use]
    pub fn target_kcal(
        &self,
        goal: Option<GoalKind>,
        config: &EnergyConfig,
        has_meaningful_data: bool,
    ) -> Option<f64> {
        if !has_meaningful_data || self.confidence == Confidence::None {
            return None;
        }
        let adjustment = config.goal_adjustments.for_goal(goal);
        self.tdee_kcal.map(|tdee| (tdee * (1.0 + adjustment)).round())
    }
}

/// Cunningham basal rate from lean body mass
#[must_use]
pub fn calculate_cunningham(weight_kg: f64, body_fat_pct: f64, config: &CunninghamConfig) -> f64 {
    let lean_mass_kg = weight_kg * (1.0 - body_fat_pct / 100.0);
    config.lean_mass_coef.mul_add(lean_mass_kg, config.intercept)
}

/// Mifflin-St Jeor basal rate
#[must_use]
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    sex: Sex,
    config: &MifflinConfig,
) -> f64 {
    let weight_component = config.weight_coef * weight_kg;
    let height_component = config.height_coef * height_cm;
    let age_component = config.age_coef * age_years;
    let sex_constant = match sex {
        Sex::Male => config.male_constant,
        Sex::Female => config.female_constant,
    };
    weight_component + height_component + age_component + sex_constant
}

fn basal_estimate(profile: &PhysicalProfile, config: &EnergyConfig) -> (f64, EnergyMethod, Confidence) {
    if let (Some(weight), Some(body_fat)) = (profile.weight_kg, profile.body_fat_pct) {
        return (
            calculate_cunningham(weight, body_fat, &config.cunningham),
            EnergyMethod::Cunningham,
            Confidence::High,
        );
    }
    if let (Some(sex), Some(age), Some(height), Some(weight)) = (
        profile.sex,
        profile.age_years,
        profile.height_cm,
        profile.weight_kg,
    ) {
        return (
            calculate_mifflin_st_jeor(weight, height, age, sex, &config.mifflin),
            EnergyMethod::MifflinStJeor,
            Confidence::Medium,
        );
    }
    if let Some(weight) = profile.weight_kg {
        return (
            weight * config.weight_only_kcal_per_kg,
            EnergyMethod::WeightOnly,
            Confidence::Low,
        );
    }
    (
        config.generic_default_kcal,
        EnergyMethod::GenericDefault,
        Confidence::None,
    )
}

/// Estimate basal and total expenditure for a profile
#[must_use]
pub fn estimate_energy(profile: &PhysicalProfile, config: &EnergyConfig) -> EnergyModel {
    let (basal, method, confidence) = basal_estimate(profile, config);
    let basal = basal.round();
    let activity_factor = config.activity_factors.factor(profile.activity_level);
    EnergyModel {
        basal_kcal: Some(basal),
        tdee_kcal: Some((basal * activity_factor).round()),
        activity_factor,
        method,
        confidence,
    }
}

/// Daily protein target (g) for a known body weight
#[must_use]
pub fn protein_target_g(weight_kg: Option<f64>, config: &EnergyConfig) -> Option<f64> {
    weight_kg.map(|weight| (weight * config.protein_g_per_kg).round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutri_core::models::ActivityLevel;

    #[test]
    fn test_cunningham_high_confidence() {
        let profile = PhysicalProfile {
            weight_kg: Some(70.0),
            body_fat_pct: Some(20.0),
            activity_level: Some(ActivityLevel::Moderate),
            ..PhysicalProfile::default()
        };
        let model = estimate_energy(&profile, &EnergyConfig::default());
        assert_eq!(model.basal_kcal, Some(1732.0));
        assert_eq!(model.tdee_kcal, Some(2685.0));
        assert_eq!(model.method, EnergyMethod::Cunningham);
        assert_eq!(model.confidence, Confidence::High);
    }

    #[test]
    fn test_mifflin_medium_confidence() {
        let profile = PhysicalProfile {
            sex: Some(Sex::Male),
            age_years: Some(30.0),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            ..PhysicalProfile::default()
        };
        let model = estimate_energy(&profile, &EnergyConfig::default());
        // 800 + 1125 - 150 + 5
        assert_eq!(model.basal_kcal, Some(1780.0));
        assert_eq!(model.confidence, Confidence::Medium);
        // unknown activity factor 1.35
        assert_eq!(model.tdee_kcal, Some(2403.0));
    }

    #[test]
    fn test_weight_only_low_confidence() {
        let profile = PhysicalProfile {
            weight_kg: Some(80.0),
            ..PhysicalProfile::default()
        };
        let model = estimate_energy(&profile, &EnergyConfig::default());
        assert_eq!(model.basal_kcal, Some(1760.0));
        assert_eq!(model.confidence, Confidence::Low);
    }

    #[test]
    fn test_generic_default_offers_no_target() {
        let config = EnergyConfig::default();
        let model = estimate_energy(&PhysicalProfile::default(), &config);
        assert_eq!(model.method, EnergyMethod::GenericDefault);
        assert_eq!(model.confidence, Confidence::None);
        assert_eq!(model.target_kcal(None, &config, true), None);
    }

    #[test]
    fn test_goal_adjustment() {
        let config = EnergyConfig::default();
        let profile = PhysicalProfile {
            weight_kg: Some(70.0),
            body_fat_pct: Some(20.0),
            activity_level: Some(ActivityLevel::Moderate),
            ..PhysicalProfile::default()
        };
        let model = estimate_energy(&profile, &config);
        assert_eq!(model.target_kcal(Some(GoalKind::LoseFat), &config, true), Some(2282.0));
        assert_eq!(model.target_kcal(Some(GoalKind::Maintain), &config, true), Some(2685.0));
        assert_eq!(model.target_kcal(Some(GoalKind::LoseFat), &config, false), None);
    }

    #[test]
    fn test_protein_target() {
        assert_eq!(protein_target_g(Some(70.0), &EnergyConfig::default()), Some(112.0));
        assert_eq!(protein_target_g(None, &EnergyConfig::default()), None);
    }
}
