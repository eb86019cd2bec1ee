// ABOUTME: Event log loading for coach-cli
// ABOUTME: Reads a JSON array of chat events from disk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nutri_core::models::ChatEvent;

/// Load a chat event log, or an empty log when no path is given
pub fn load_events(path: Option<&Path>) -> Result<Vec<ChatEvent>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event log {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Event log {} is not a JSON array of events", path.display()))
}
