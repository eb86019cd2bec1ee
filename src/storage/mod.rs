// ABOUTME: Persisted-state port for the coach plan with pluggable backends
// ABOUTME: One opaque JSON slot per user, loaded and saved as untyped values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan storage
//!
//! The store never trusts what comes back from a backend: it receives a raw
//! [`serde_json::Value`] and normalizes it field by field. Backends only move
//! bytes.

/// JSON file per slot
pub mod file;
/// In-memory slot for tests and embedding
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::sync::Arc;

use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Storage provider trait for the per-user plan slot
pub trait PlanStorage: Send + Sync {
    /// Load the raw persisted value, `None` when the slot is empty
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn load(&self) -> AppResult<Option<Value>>;

    /// Replace the persisted value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn save(&self, value: &Value) -> AppResult<()>;

    /// Whether a persistence context exists at all
    fn is_available(&self) -> bool {
        true
    }
}

impl<S: PlanStorage + ?Sized> PlanStorage for Arc<S> {
    fn load(&self) -> AppResult<Option<Value>> {
        (**self).load()
    }

    fn save(&self, value: &Value) -> AppResult<()> {
        (**self).save(value)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Backend for contexts with no persistence (server-side rendering, dry runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl PlanStorage for UnavailableStorage {
    fn load(&self) -> AppResult<Option<Value>> {
        Ok(None)
    }

    fn save(&self, _value: &Value) -> AppResult<()> {
        Err(AppError::storage("No persistence context available"))
    }

    fn is_available(&self) -> bool {
        false
    }
}
