// ABOUTME: File-backed plan storage writing one JSON document per slot
// ABOUTME: Writes go to a temporary sibling file first and are renamed into place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use super::PlanStorage;
use crate::errors::{AppError, AppResult};

/// `<data_dir>/<slot>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

fn is_valid_slot(slot: &str) -> bool {
    !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FileStorage {
    /// Storage for `slot` under `data_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the slot name contains anything other than ASCII
    /// letters, digits, `-` or `_`
    pub fn new(data_dir: impl AsRef<Path>, slot: &str) -> AppResult<Self> {
        if !is_valid_slot(slot) {
            return Err(AppError::invalid_input(format!("Invalid storage slot: {slot:?}")));
        }
        Ok(Self {
            path: data_dir.as_ref().join(format!("{slot}.json")),
        })
    }

    /// Path of the slot file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl PlanStorage for FileStorage {
    fn load(&self) -> AppResult<Option<Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt plan file");
                Err(e.into())
            }
        }
    }

    fn save(&self, value: &Value) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&temp, &self.path)?;
        debug!(path = %self.path.display(), "Plan persisted");
        Ok(())
    }
}
