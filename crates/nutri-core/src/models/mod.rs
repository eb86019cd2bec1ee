// ABOUTME: Core data models for food tracking, coach plans, and chat events
// ABOUTME: Re-exports every model so downstream crates import from one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models shared across the workspace.

/// Chat event log models
pub mod events;
/// Food catalog and ledger models
pub mod food;
/// Coach plan aggregate models
pub mod plan;

pub use events::{ChatEvent, EventPayload, EventRole};
pub use food::{DayFoodTotals, FoodCatalogItem, FoodEntry, FoodSource, MacrosPer100g};
pub use plan::{
    ActivityLevel, CoachPlan, CoachPlanPatch, CognitiveProfile, CognitiveProfilePatch,
    DayOfWeek, DaySnapshot, DetailPreference, GoalKind, Goals, History, MacroTotals,
    PhysicalProfile, PlanMetadata, PlanTime, Preferences, Routines, Sex, Signals,
    TechnicalLevel, TodaySignals, TodaySignalsPatch, ToneStyle, WeeklyPlan, WeeklyRoutineEntry,
};
