// ABOUTME: Runtime configuration for the coach pipeline read from the environment
// ABOUTME: Default timezone, plan data directory, and food parser confirmation policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Runtime configuration
//!
//! | Variable                 | Default                         |
//! |--------------------------|---------------------------------|
//! | `COACH_DEFAULT_TIMEZONE` | `UTC`                           |
//! | `COACH_DATA_DIR`         | `<platform data dir>/nutri-coach` |
//! | `COACH_CONFIRM_WEEKDAY`  | `true`                          |

use std::env;
use std::path::PathBuf;

use nutri_core::constants::plan::FALLBACK_TIMEZONE;
use nutri_core::dates::parse_timezone;
use nutri_intelligence::FoodParserPolicy;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};

/// Directory name created under the platform data directory
pub const DATA_DIR_NAME: &str = "nutri-coach";

/// Runtime configuration for the coach pipeline
#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// Timezone used when neither the caller nor the plan supplies a valid one
    pub default_timezone: String,
    /// Directory holding one JSON file per plan slot
    pub data_dir: PathBuf,
    /// Food parser behavior
    pub policy: FoodParserPolicy,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            default_timezone: FALLBACK_TIMEZONE.to_owned(),
            data_dir: default_data_dir(),
            policy: FoodParserPolicy::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl CoachConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value or the
    /// resulting configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(timezone) = env::var("COACH_DEFAULT_TIMEZONE") {
            config.default_timezone = timezone.trim().to_owned();
        }
        if let Ok(dir) = env::var("COACH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(value) = env::var("COACH_CONFIRM_WEEKDAY") {
            config.policy.confirm_weekday = parse_bool(&value).ok_or_else(|| {
                AppError::config(format!("Invalid COACH_CONFIRM_WEEKDAY: {value}"))
            })?;
        }

        config.validate()?;
        info!(
            timezone = %config.default_timezone,
            data_dir = %config.data_dir.display(),
            confirm_weekday = config.policy.confirm_weekday,
            "Coach configuration loaded"
        );
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the default timezone is not a known IANA zone or
    /// the data directory is empty
    pub fn validate(&self) -> AppResult<()> {
        if parse_timezone(&self.default_timezone).is_none() {
            return Err(AppError::config(format!(
                "Unknown default timezone: {}",
                self.default_timezone
            )));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::config("Data directory must not be empty"));
        }
        Ok(())
    }

    /// First valid timezone among the request, the plan, and the configured default
    #[must_use]
    pub fn resolve_timezone<'a>(
        &'a self,
        requested: Option<&'a str>,
        plan_timezone: Option<&'a str>,
    ) -> &'a str {
        [requested, plan_timezone, Some(self.default_timezone.as_str())]
            .into_iter()
            .flatten()
            .find(|name| parse_timezone(name).is_some())
            .unwrap_or_else(|| {
                warn!(fallback = FALLBACK_TIMEZONE, "No valid timezone configured");
                FALLBACK_TIMEZONE
            })
    }
}
