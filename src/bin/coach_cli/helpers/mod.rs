// ABOUTME: Helper modules for coach-cli
// ABOUTME: Provides output formatting and event log loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
pub mod events;
