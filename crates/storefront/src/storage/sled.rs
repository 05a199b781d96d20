//! Sled-backed storage implementation.
//!
//! Values are stored JSON-encoded. Each write is flushed before returning
//! so that a reopened store observes every acknowledged mutation.

use std::path::Path;

use serde_json::Value;

use super::{PersistenceError, Storage};

/// A [`Storage`] implementation over an embedded sled database.
#[derive(Debug)]
pub struct SledStorage {
    db: sled::Db,
}

impl SledStorage {
    /// Open (or create) a sled database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Backend`] if the database cannot be
    /// opened, e.g. because another process holds the lock.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }
}

impl From<sled::Error> for PersistenceError {
    fn from(err: sled::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl Storage for SledStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        match self.db.get(key)? {
            Some(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|source| {
                PersistenceError::Corrupt {
                    key: key.to_owned(),
                    source,
                }
            }),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec(&value).map_err(|source| PersistenceError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.db.insert(key, bytes)?;
        self.db.flush()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.db.remove(key)?;
        self.db.flush()?;
        Ok(())
    }
}
