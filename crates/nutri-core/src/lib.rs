// ABOUTME: Core types and constants for the Nutri Coach state derivation pipeline
// ABOUTME: Foundation crate with error handling, data models, calendar helpers, and validators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutri Core
//!
//! Foundation crate providing shared types and constants for the Nutri Coach
//! workspace. It is designed to change infrequently so the intelligence and
//! application crates compile incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Physiological ranges, schema version, and limits
//! - **models**: Food, coach plan, and chat event data models
//! - **dates**: Timezone-aware day id helpers
//! - **validation**: Composable field validators

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (food ledger, coach plan, chat events)
pub mod models;

/// Timezone-aware calendar helpers
pub mod dates;

/// Field validators returning `Option`
pub mod validation;
