//! Durable key-value storage capability.
//!
//! Persistence is an injected dependency, not ambient state: both stores
//! write through a shared [`Storage`] handle, and tests substitute the
//! in-memory implementation. Keys are plain strings, values are JSON.
//!
//! # Key namespaces
//!
//! - `identities`, `activeSession` - written only by the identity store
//! - `cart:<owner>` - written only by the cart store
//!
//! Every `set`/`remove` must be applied synchronously before returning;
//! there are no retries and no background flushing.

pub mod memory;
pub mod sled;

pub use memory::MemoryStorage;
pub use self::sled::SledStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backing store could not be read or written.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A record could not be encoded for storage.
    #[error("failed to encode record for key {key}: {source}")]
    Encode {
        /// Key the record was being written under.
        key: String,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A stored record did not decode into the expected shape.
    #[error("corrupt record at key {key}: {source}")]
    Corrupt {
        /// Key the record was read from.
        key: String,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// A string-keyed store of JSON values.
///
/// Implementations apply each mutation synchronously; a returned `Ok` means
/// the write is durable to the extent the backend can make it so.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backend cannot be written.
    fn set(&self, key: &str, value: Value) -> Result<(), PersistenceError>;

    /// Delete the value stored under `key`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Typed record helpers over any [`Storage`].
pub trait StorageExt: Storage {
    /// Read and decode the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Corrupt`] if the stored value does not
    /// decode as `T`, or the backend's error if it cannot be read.
    fn get_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistenceError> {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| PersistenceError::Corrupt {
                    key: key.to_owned(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Encode and store `record` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Encode`] if the record cannot be
    /// serialized, or the backend's error if it cannot be written.
    fn put_record<T: Serialize + ?Sized>(&self, key: &str, record: &T) -> Result<(), PersistenceError> {
        let value = serde_json::to_value(record).map_err(|source| PersistenceError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.set(key, value)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}
