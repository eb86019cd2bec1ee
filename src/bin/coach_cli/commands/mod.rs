// ABOUTME: Re-exports command modules for coach-cli
// ABOUTME: Provides message ingestion, plan inspection, and dashboard commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod chat;
pub mod dashboard;
pub mod plan;
