// ABOUTME: Integration tests for environment-driven configuration
// ABOUTME: Validates coach and intelligence config overrides and their error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use nutri_coach::config::CoachConfig;
use nutri_coach::errors::ErrorCode;
use nutri_intelligence::IntelligenceConfig;
use serial_test::serial;

const COACH_VARS: &[&str] = &[
    "COACH_DEFAULT_TIMEZONE",
    "COACH_DATA_DIR",
    "COACH_CONFIRM_WEEKDAY",
];

fn clear(vars: &[&str]) {
    for var in vars {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_coach_config_from_env() {
    clear(COACH_VARS);
    env::set_var("COACH_DEFAULT_TIMEZONE", "America/Mexico_City");
    env::set_var("COACH_DATA_DIR", "/tmp/nutri-coach-test");
    env::set_var("COACH_CONFIRM_WEEKDAY", "no");

    let config = CoachConfig::from_env().unwrap();

    assert_eq!(config.default_timezone, "America/Mexico_City");
    assert_eq!(config.data_dir, PathBuf::from("/tmp/nutri-coach-test"));
    assert!(!config.policy.confirm_weekday);

    clear(COACH_VARS);
}

#[test]
#[serial]
fn test_coach_config_rejects_unknown_timezone() {
    clear(COACH_VARS);
    env::set_var("COACH_DEFAULT_TIMEZONE", "Mars/Olympus");

    let error = CoachConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);

    clear(COACH_VARS);
}

#[test]
#[serial]
fn test_coach_config_rejects_bad_flag() {
    clear(COACH_VARS);
    env::set_var("COACH_CONFIRM_WEEKDAY", "maybe");

    assert!(CoachConfig::from_env().is_err());

    clear(COACH_VARS);
}

#[test]
#[serial]
fn test_timezone_resolution_order() {
    clear(COACH_VARS);
    let config = CoachConfig::from_env().unwrap();

    assert_eq!(
        config.resolve_timezone(Some("Asia/Tokyo"), Some("Europe/Madrid")),
        "Asia/Tokyo"
    );
    assert_eq!(
        config.resolve_timezone(Some("Bogus/Zone"), Some("Europe/Madrid")),
        "Europe/Madrid"
    );
    assert_eq!(
        config.resolve_timezone(None, None),
        config.default_timezone.as_str()
    );
}

#[test]
#[serial]
fn test_intelligence_env_overrides() {
    env::set_var("NUTRI_ENERGY_PROTEIN_G_PER_KG", "2.0");
    env::set_var("NUTRI_DASHBOARD_FALLBACK_WEIGHT_KG", "75");

    let config = IntelligenceConfig::load().unwrap();

    assert!((config.energy.protein_g_per_kg - 2.0).abs() < 0.001);
    assert!((config.dashboard.fallback_body_weight_kg - 75.0).abs() < 0.001);

    env::remove_var("NUTRI_ENERGY_PROTEIN_G_PER_KG");
    env::remove_var("NUTRI_DASHBOARD_FALLBACK_WEIGHT_KG");
}

#[test]
#[serial]
fn test_intelligence_rejects_unparseable_override() {
    env::set_var("NUTRI_GOAL_LOSE_FAT_ADJUSTMENT", "a lot");

    assert!(IntelligenceConfig::load().is_err());

    env::remove_var("NUTRI_GOAL_LOSE_FAT_ADJUSTMENT");
}
