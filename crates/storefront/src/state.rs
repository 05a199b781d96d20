//! Session state shared across the application.

use std::sync::Arc;

use crate::error::SessionError;
use crate::models::Identity;
use crate::storage::{PersistenceError, Storage};
use crate::stores::{CartStore, IdentityStore};

/// The shopping session: one identity store and one cart store over a
/// shared storage handle.
///
/// Construct this once at process start and pass it to collaborators; it is
/// cheaply cloneable via `Arc`, so every clone addresses the same single
/// in-memory copy of the identity set and carts. This replaces the implicit
/// global singleton a client app would reach for.
#[derive(Clone)]
pub struct ShopSession {
    inner: Arc<ShopSessionInner>,
}

struct ShopSessionInner {
    identities: Arc<IdentityStore>,
    carts: CartStore,
}

impl ShopSession {
    /// Wire the stores over `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the persisted identity set cannot be
    /// read.
    pub fn new(storage: Arc<dyn Storage>) -> Result<Self, PersistenceError> {
        let identities = Arc::new(IdentityStore::open(Arc::clone(&storage))?);
        let carts = CartStore::new(storage, Arc::clone(&identities));

        Ok(Self {
            inner: Arc::new(ShopSessionInner { identities, carts }),
        })
    }

    /// Get a reference to the identity store.
    #[must_use]
    pub fn identities(&self) -> &IdentityStore {
        &self.inner.identities
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }

    /// Log in: authenticate, then hand the anonymous cart over to the new
    /// identity.
    ///
    /// Cart migration runs exactly once, immediately after the identity
    /// becomes active and before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if authentication fails or either store
    /// cannot persist.
    pub fn sign_in(&self, username: &str, credential: &str) -> Result<Identity, SessionError> {
        let identity = self.inner.identities.authenticate(username, credential)?;
        self.inner.carts.migrate_anonymous_cart(identity.id)?;
        Ok(identity)
    }

    /// Register a new identity and immediately log it in, migrating the
    /// anonymous cart along the way.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if registration or the follow-up login
    /// fails.
    pub fn sign_up(
        &self,
        username: &str,
        email: &str,
        credential: &str,
    ) -> Result<Identity, SessionError> {
        self.inner.identities.register(username, email, credential)?;
        self.sign_in(username, credential)
    }

    /// Log out. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the persisted session record cannot be
    /// deleted.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.inner.identities.end_session()?;
        Ok(())
    }
}
