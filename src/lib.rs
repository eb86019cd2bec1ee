// ABOUTME: Main library entry point for the Nutri Coach state derivation core
// ABOUTME: Wires the coach plan store, storage adapters, dashboard projection, and chat logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Nutri Coach
//!
//! State derivation core for a Spanish-language health coaching chat. It
//! turns free-text user messages into a durable per-user coach plan and a
//! read-only dashboard projection.
//!
//! ## Features
//!
//! - **Food ledger**: immutable entries with correction supersession, parsed
//!   from messages like "comí 2 huevos" or "ayer comí pollo"
//! - **Coach plan store**: normalized persistence, field-level merges, and a
//!   day rollover keyed by `{date}@{timezone}`
//! - **Dashboard metrics**: seven-day intake, burn, weight, and energy targets
//! - **Chat logic**: per-message orchestration and deterministic replies
//!
//! ## Architecture
//!
//! - **`nutri_core`**: models, errors, dates, validation, constants
//! - **`nutri_intelligence`**: parsers, classifiers, and estimation heuristics
//! - **storage**: the `PlanStorage` port and its adapters
//! - **`coach_plan`**: the store built on that port
//! - **dashboard** / **chat**: projections and orchestration over the store
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use nutri_coach::chat::ingest_user_message;
//! use nutri_coach::coach_plan::CoachPlanStore;
//! use nutri_coach::errors::AppResult;
//! use nutri_coach::storage::MemoryStorage;
//! use nutri_intelligence::FoodParserPolicy;
//!
//! fn main() -> AppResult<()> {
//!     let store = CoachPlanStore::new(MemoryStorage::new());
//!     let outcome = ingest_user_message(
//!         &store,
//!         "comí 2 huevos",
//!         Utc::now(),
//!         "Europe/Madrid",
//!         FoodParserPolicy::default(),
//!     )?;
//!     println!("{:?}", outcome.status);
//!     Ok(())
//! }
//! ```

/// Unified error handling
pub mod errors;

/// Runtime configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Plan persistence port and adapters
pub mod storage;

/// Coach plan store
pub mod coach_plan;

/// Dashboard metrics projection
pub mod dashboard;

/// Per-message chat orchestration
pub mod chat;
