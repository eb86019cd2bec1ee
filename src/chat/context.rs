// ABOUTME: Plain JSON context of the coach plan and dashboard for prompt interpolation
// ABOUTME: Flattens profile, goals, today's figures, and the trailing week into stable keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutri_core::models::CoachPlan;
use nutri_intelligence::resolve_effective_entries;
use serde_json::{json, Value};

use crate::dashboard::DashboardMetrics;

/// Entries of today's ledger included in the context
const RECENT_ENTRIES: usize = 8;

/// Build the context object a prompt template interpolates
#[must_use]
pub fn build_prompt_context(plan: &CoachPlan, metrics: &DashboardMetrics) -> Value {
    let today_entries = resolve_effective_entries(&plan.signals.today.food_entries);
    let recent: Vec<Value> = today_entries
        .iter()
        .rev()
        .take(RECENT_ENTRIES)
        .map(|entry| {
            json!({
                "name": entry.name,
                "grams": entry.grams,
                "kcal": entry.kcal,
                "isEstimated": entry.is_estimated,
            })
        })
        .collect();

    let weekly = &metrics.weekly;
    json!({
        "timezone": metrics.timezone,
        "today": {
            "dayId": metrics.daily.day_id,
            "dateIso": metrics.daily.date_iso,
            "kcalIn": metrics.daily.kcal_in,
            "kcalOut": metrics.daily.kcal_out,
            "balance": metrics.daily.balance,
            "targetKcal": metrics.daily.target_kcal,
            "remainingKcal": metrics.daily.remaining_kcal,
            "weightKg": metrics.daily.weight_kg,
            "foods": plan.signals.today.foods,
            "activities": plan.signals.today.activities,
            "recentEntries": recent,
        },
        "nutrition": metrics.nutrition,
        "energy": {
            "basalKcal": metrics.daily.basal_kcal,
            "tdeeKcal": metrics.daily.tdee_kcal,
            "confidence": metrics.daily.confidence,
            "method": metrics.energy.method,
        },
        "week": {
            "avgKcalIn": weekly.avg_kcal_in,
            "avgKcalOut": weekly.avg_kcal_out,
            "loggedDays": weekly.logged_days,
            "trainingDays": weekly.training_days,
            "weightTrend": weekly.weight_trend,
        },
        "profile": metrics.profile,
        "cognitiveProfile": plan.cognitive_profile,
        "goals": plan.goals,
        "preferences": plan.preferences,
        "recurring": metrics.recurring,
        "weeklyPlan": plan.weekly_plan.as_ref().map(|weekly_plan| weekly_plan.text.as_str()),
        "hasMeaningfulData": metrics.has_meaningful_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build_dashboard_metrics_with;
    use chrono::{TimeZone, Utc};
    use nutri_intelligence::{IntelligenceConfig, KeywordClassifier};

    #[test]
    fn test_context_for_empty_plan() {
        let plan = CoachPlan::default();
        let now = Utc.with_ymd_and_hms(2025, 10, 14, 10, 0, 0).unwrap();
        let metrics = build_dashboard_metrics_with(
            &[],
            &plan,
            now,
            &KeywordClassifier,
            &IntelligenceConfig::default(),
        );
        let context = build_prompt_context(&plan, &metrics);
        assert_eq!(context["today"]["dateIso"], "2025-10-14");
        assert!(context["today"]["targetKcal"].is_null());
        assert_eq!(context["energy"]["confidence"], "none");
        assert_eq!(context["hasMeaningfulData"], false);
        assert!(context["weeklyPlan"].is_null());
    }
}
