// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Thread-safe, populate-once registry shared by the schema and name caches.

use super::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe registry of shared values keyed by name.
///
/// Uses RwLock for concurrent read access with exclusive write access.
/// Values are stored behind `Arc` and never mutated after insertion, so a
/// poisoned lock cannot expose a half-built entry and is simply recovered.
pub struct Registry<T> {
    inner: RwLock<HashMap<String, Arc<T>>>,
}

impl<T> Registry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a value, replacing any previous entry for `name`.
    pub fn insert(&self, name: impl Into<String>, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.insert(name.into(), Arc::clone(&value));
        value
    }

    /// Get a value by name.
    pub fn get(&self, name: &str) -> Option<Arc<T>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.get(name).cloned()
    }

    /// Get a value, building it with `build` if it is not present yet.
    ///
    /// Population happens under the write lock: concurrent first accesses for
    /// the same name run `build` exactly once and every caller observes the
    /// same `Arc`. A failing `build` leaves the registry unchanged.
    pub fn get_or_try_insert_with<F>(&self, name: &str, build: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = self.get(name) {
            return Ok(value);
        }

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = inner.get(name) {
            return Ok(Arc::clone(value));
        }
        let value = Arc::new(build()?);
        inner.insert(name.to_string(), Arc::clone(&value));
        Ok(value)
    }

    /// Check if a value is registered.
    pub fn contains(&self, name: &str) -> bool {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.contains_key(name)
    }

    /// Remove a value from the registry.
    pub fn remove(&self, name: &str) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.remove(name).is_some()
    }

    /// Clear all values from the registry.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.clear();
    }

    /// Get the number of registered values.
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
