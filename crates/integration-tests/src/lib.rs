//! Integration tests for Lavka.
//!
//! The scenario tests in `tests/` drive the wired-up session through its
//! public API, over either the in-memory storage fake or a sled database in
//! a temp directory. This crate holds the shared helpers.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;

use lavka_core::{Price, ProductId};
use lavka_storefront::models::Product;
use lavka_storefront::state::ShopSession;
use lavka_storefront::storage::{MemoryStorage, PersistenceError, Storage};

/// Build a catalog product for tests.
#[must_use]
pub fn product(id: i32, price: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("product-{id}"),
        price: Price::from(price),
        display_glyph: "📦".to_owned(),
        description: String::new(),
    }
}

/// A session over fresh in-memory storage, returned with its storage handle
/// so tests can inspect the persisted layout directly.
///
/// # Panics
///
/// Panics if the session cannot be wired (empty storage never fails).
#[must_use]
pub fn memory_session() -> (Arc<dyn Storage>, ShopSession) {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    #[allow(clippy::unwrap_used)]
    let session = ShopSession::new(Arc::clone(&storage)).unwrap();
    (storage, session)
}

/// A storage fake whose writes can be made to fail on demand.
///
/// Reads always succeed against the inner map, so tests can flip writes off,
/// attempt a mutation, and then verify that nothing changed.
#[derive(Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    fail_writes: AtomicBool,
}

impl FailingStorage {
    /// Create a fake with writes initially succeeding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn write failures on or off.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Backend(
                "injected write failure".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Storage for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.inner.remove(key)
    }
}
