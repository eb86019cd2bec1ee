// ABOUTME: Heuristic intelligence for the Nutri Coach state derivation pipeline
// ABOUTME: Food catalog and ledger, message parsing and classification, profile and energy estimation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutri Intelligence
//!
//! Pure, synchronous heuristics that turn Spanish free text into structured
//! nutrition and training signals. Nothing in this crate performs I/O; the
//! application crate owns persistence and orchestration.
//!
//! ## Modules
//!
//! - **food_catalog** / **food_ledger** / **food_parser**: food tracking
//! - **classifier**: event classification strategy and numeric extractors
//! - **training** / **recurring_training**: MET burn estimates and weekly patterns
//! - **profile_inference**: physical profile completion from messages
//! - **energy_model**: basal/TDEE cascade with confidence tiers
//! - **config**: tunable coefficients with env overrides

/// Intelligence configuration (energy coefficients, dashboard heuristics)
pub mod config;

/// Text normalization shared by every parser
pub mod text;

/// Static food reference table
pub mod food_catalog;

/// Immutable food ledger with correction supersession
pub mod food_ledger;

/// Free-text food message parser
pub mod food_parser;

/// Event classification strategy
pub mod classifier;

/// Activity detection and MET burn estimates
pub mod training;

/// Recurring weekly training detection
pub mod recurring_training;

/// Physical profile inference
pub mod profile_inference;

/// Basal and total energy expenditure estimation
pub mod energy_model;

pub use classifier::{EventCategory, EventClassifier, KeywordClassifier, MealType};
pub use config::IntelligenceConfig;
pub use energy_model::{Confidence, EnergyMethod, EnergyModel};
pub use food_catalog::{catalog_item_by_id, find_catalog_item_by_text, food_catalog};
pub use food_ledger::{
    compute_day_food_totals, compute_from_catalog, find_last_matching_entry,
    resolve_effective_entries, FoodEntryOptions,
};
pub use food_parser::{
    merge_food_entries, parse_food_mutation, FoodParserPolicy, ParsedFoodMutation,
    TargetDayContext,
};
pub use recurring_training::{PatternSource, RecurringTrainingPattern};
