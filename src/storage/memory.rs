// ABOUTME: In-memory plan storage backend guarded by a mutex
// ABOUTME: Counts writes so callers can assert that no-op operations skip persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use super::PlanStorage;
use crate::errors::{AppError, AppResult};

/// Mutex-guarded single slot
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<Value>>,
    writes: AtomicUsize,
}

impl MemoryStorage {
    /// Empty slot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with a raw value, as if persisted earlier
    #[must_use]
    pub fn with_value(value: Value) -> Self {
        Self {
            slot: Mutex::new(Some(value)),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save` calls
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of the raw persisted value
    ///
    /// # Errors
    ///
    /// Returns an error if the slot mutex is poisoned
    pub fn snapshot(&self) -> AppResult<Option<Value>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Option<Value>>> {
        self.slot
            .lock()
            .map_err(|_| AppError::storage("Memory storage mutex poisoned"))
    }
}

impl PlanStorage for MemoryStorage {
    fn load(&self) -> AppResult<Option<Value>> {
        self.snapshot()
    }

    fn save(&self, value: &Value) -> AppResult<()> {
        *self.lock()? = Some(value.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());
        storage.save(&json!({"metadata": {"version": 3}})).unwrap();
        assert_eq!(storage.write_count(), 1);
        assert_eq!(
            storage.load().unwrap(),
            Some(json!({"metadata": {"version": 3}}))
        );
    }
}
