// ABOUTME: Profile completion, energy targets, and nutrition summary for the dashboard
// ABOUTME: Applies the energy model cascade and gates targets on meaningful data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutri_core::models::{CoachPlan, MacroTotals, PhysicalProfile};
use nutri_intelligence::config::EnergyConfig;
use nutri_intelligence::energy_model::protein_target_g;
use nutri_intelligence::profile_inference::infer_physical_profile;
use nutri_intelligence::{compute_day_food_totals, Confidence, EnergyModel};

use super::series::DayMessage;
use super::{DayPoint, NutritionSummary, SignalSource};

/// Complete the plan's profile from user messages, newest first
#[must_use]
pub fn resolve_profile(plan: &CoachPlan, messages: &[DayMessage<'_>]) -> PhysicalProfile {
    infer_physical_profile(
        &plan.physical_profile,
        messages.iter().rev().map(|message| message.text),
    )
}

/// Fill a missing profile weight from the newest day point that has one
pub fn fill_weight_from_series(profile: &mut PhysicalProfile, points: &[DayPoint]) {
    if profile.weight_kg.is_none() {
        profile.weight_kg = points.iter().rev().find_map(|point| point.weight_kg);
    }
}

/// Whether anything beyond defaults is known
#[must_use]
pub fn has_meaningful_data(profile: &PhysicalProfile, points: &[DayPoint]) -> bool {
    profile.has_physiological_data()
        || points
            .iter()
            .any(|point| point.kcal_in > 0.0 || point.kcal_out > 0.0 || point.weight_kg.is_some())
}

/// Energy figures exposed on the daily summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyEnergy {
    /// Goal-adjusted kcal target
    pub target_kcal: Option<f64>,
    /// Basal estimate
    pub basal_kcal: Option<f64>,
    /// TDEE estimate
    pub tdee_kcal: Option<f64>,
    /// Effective confidence
    pub confidence: Confidence,
}

/// Gate the energy model on confidence and meaningful data
#[must_use]
pub fn daily_energy(
    energy: &EnergyModel,
    plan: &CoachPlan,
    config: &EnergyConfig,
    has_meaningful_data: bool,
) -> DailyEnergy {
    let target_kcal = energy.target_kcal(plan.goals.primary, config, has_meaningful_data);
    if target_kcal.is_none() {
        return DailyEnergy {
            target_kcal: None,
            basal_kcal: None,
            tdee_kcal: None,
            confidence: Confidence::None,
        };
    }
    DailyEnergy {
        target_kcal,
        basal_kcal: energy.basal_kcal,
        tdee_kcal: energy.tdee_kcal,
        confidence: energy.confidence,
    }
}

/// Today's macros from the effective ledger, else from the live running totals
#[must_use]
pub fn nutrition_summary(
    plan: &CoachPlan,
    today_day_id: &str,
    profile: &PhysicalProfile,
    config: &EnergyConfig,
) -> NutritionSummary {
    let protein_target = protein_target_g(profile.weight_kg, config);
    let entries = plan.food_entries_for_day(today_day_id);
    if !entries.is_empty() {
        let totals = compute_day_food_totals(entries);
        return NutritionSummary {
            kcal: totals.kcal,
            protein_g: totals.protein_g,
            carbs_g: totals.carbs_g,
            fat_g: totals.fat_g,
            fiber_g: Some(totals.fiber_g),
            entries_count: totals.meals_count,
            protein_target_g: protein_target,
            source: SignalSource::Ledger,
        };
    }

    let live = &plan.signals.today;
    let live_macros = (live.day_id == today_day_id).then_some(live.macros).flatten();
    let MacroTotals {
        protein_g,
        carbs_g,
        fat_g,
        fiber_g,
    } = live_macros.unwrap_or_default();
    NutritionSummary {
        kcal: if live.day_id == today_day_id { live.kcal_in } else { 0.0 },
        protein_g,
        carbs_g,
        fat_g,
        fiber_g,
        entries_count: 0,
        protein_target_g: protein_target,
        source: if live_macros.is_some() {
            SignalSource::Live
        } else {
            SignalSource::None
        },
    }
}
