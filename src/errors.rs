// ABOUTME: Error types for the coach application crate
// ABOUTME: Re-exports the workspace error taxonomy so callers import from one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! The application crate shares the core taxonomy. Store and storage
//! operations return [`AppResult`]; the CLI converts to `anyhow` at the edge.

pub use nutri_core::errors::{AppError, AppResult, ErrorCode};
