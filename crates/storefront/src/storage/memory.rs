//! In-memory storage implementation.
//!
//! The substitutable fake for tests, and a real backend for ephemeral
//! sessions that should not outlive the process.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use super::{PersistenceError, Storage};

/// A [`Storage`] implementation backed by a mutexed map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still guards a structurally intact map.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, Value>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), PersistenceError> {
        self.entries().insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.entries().remove(key);
        Ok(())
    }
}
