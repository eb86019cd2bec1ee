// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, fixed clocks, and in-memory plan stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `nutri_coach`

use std::env;
use std::sync::Once;

use chrono::{DateTime, TimeZone, Utc};
use nutri_coach::coach_plan::CoachPlanStore;
use nutri_coach::storage::MemoryStorage;
use tracing::Level;

/// Timezone used by most scenarios
pub const MADRID: &str = "Europe/Madrid";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// UTC instant from calendar fields
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

/// Tuesday 2025-10-14, 12:00 in Madrid
pub fn tuesday_noon() -> DateTime<Utc> {
    utc(2025, 10, 14, 10, 0)
}

/// Fresh store over empty in-memory storage
pub fn memory_store() -> CoachPlanStore<MemoryStorage> {
    init_test_logging();
    CoachPlanStore::new(MemoryStorage::new()).with_default_timezone(MADRID)
}
