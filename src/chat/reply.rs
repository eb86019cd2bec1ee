// ABOUTME: Deterministic Spanish replies used when no language model answer is available
// ABOUTME: Scales detail with the cognitive profile's detail preference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutri_core::models::{CognitiveProfile, DetailPreference, ToneStyle};
use nutri_intelligence::{Confidence, EventCategory, ParsedFoodMutation, TargetDayContext};

use super::{IngestOutcome, MutationStatus};
use crate::dashboard::DashboardMetrics;

fn whole(value: f64) -> String {
    format!("{value:.0}")
}

fn day_label(target: &TargetDayContext) -> String {
    target
        .confirmation_label
        .clone()
        .unwrap_or_else(|| format!("el {}", target.date_iso))
}

fn mutation_line(outcome: &IngestOutcome, metrics: &DashboardMetrics) -> String {
    match (&outcome.status, &outcome.mutation) {
        (MutationStatus::Applied, ParsedFoodMutation::Add { target, entry }) => {
            let when = if target.is_retroactive {
                format!(" ({})", day_label(target))
            } else {
                String::new()
            };
            format!(
                "Anotado{when}: {}, {} g ({} kcal).",
                entry.name,
                whole(entry.grams),
                whole(entry.kcal)
            )
        }
        (MutationStatus::Applied, ParsedFoodMutation::Correct { entry, .. }) => format!(
            "Corregido: {} queda en {} g ({} kcal).",
            entry.name,
            whole(entry.grams),
            whole(entry.kcal)
        ),
        (MutationStatus::PendingConfirmation, mutation) => mutation.target().map_or_else(
            || "¿Lo registro? Confírmalo y lo anoto.".to_owned(),
            |target| format!("¿Lo registro para {}? Confírmalo y lo anoto.", day_label(target)),
        ),
        (MutationStatus::NothingToCorrect, _) => {
            "No encontré qué corregir en ese día. Si quieres, lo anoto como algo nuevo.".to_owned()
        }
        _ => match outcome.category {
            EventCategory::Training => format!(
                "Entrenamiento registrado. Hoy llevas {} kcal de gasto.",
                whole(metrics.daily.kcal_out)
            ),
            EventCategory::Weight => metrics.daily.weight_kg.map_or_else(
                || "Peso anotado.".to_owned(),
                |weight| format!("Peso anotado: {weight} kg."),
            ),
            EventCategory::Food => {
                "Anotado. Si me dices qué y cuánto, lo registro con más precisión.".to_owned()
            }
            EventCategory::Other => "Te leo. ¿En qué te ayudo hoy?".to_owned(),
        },
    }
}

fn today_line(metrics: &DashboardMetrics) -> String {
    let daily = &metrics.daily;
    daily.target_kcal.map_or_else(
        || format!("Hoy llevas {} kcal.", whole(daily.kcal_in)),
        |target| {
            format!(
                "Hoy llevas {} de {} kcal.",
                whole(daily.kcal_in),
                whole(target)
            )
        },
    )
}

fn detail_lines(metrics: &DashboardMetrics) -> Vec<String> {
    let mut lines = Vec::new();
    let daily = &metrics.daily;
    lines.push(format!(
        "Gasto por entrenamiento: {} kcal, balance {} kcal.",
        whole(daily.kcal_out),
        whole(daily.balance)
    ));
    let nutrition = &metrics.nutrition;
    if let Some(protein_target) = nutrition.protein_target_g {
        lines.push(format!(
            "Proteína: {} de {} g.",
            whole(nutrition.protein_g),
            whole(protein_target)
        ));
    }
    if let Some(average) = metrics.weekly.avg_kcal_in {
        lines.push(format!(
            "Media semanal: {} kcal en {} días con registro.",
            whole(average),
            metrics.weekly.logged_days
        ));
    }
    if daily.confidence == Confidence::None {
        lines.push(
            "Para calcular tu objetivo necesito tu peso, altura, edad y sexo.".to_owned(),
        );
    }
    lines
}

/// Deterministic reply for an ingested message
///
/// `brief` answers with the mutation line only, `balanced` adds today's intake
/// against the target, `detailed` adds burn, protein, and the weekly average.
#[must_use]
pub fn fallback_reply(
    outcome: &IngestOutcome,
    metrics: &DashboardMetrics,
    cognitive: &CognitiveProfile,
) -> String {
    let mut parts = Vec::new();
    let detail = cognitive.detail_preference;
    if outcome.rotated && detail != DetailPreference::Brief {
        parts.push("Empezamos un nuevo día.".to_owned());
    }
    parts.push(mutation_line(outcome, metrics));
    if detail != DetailPreference::Brief {
        parts.push(today_line(metrics));
    }
    if detail == DetailPreference::Detailed {
        parts.extend(detail_lines(metrics));
    }
    if cognitive.tone_style == ToneStyle::Motivational && outcome.status == MutationStatus::Applied
    {
        parts.push("¡Sigue así!".to_owned());
    }
    parts.join(" ")
}
