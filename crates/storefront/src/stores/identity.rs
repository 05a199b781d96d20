//! Identity store: registration, authentication, and the active session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use thiserror::Error;

use lavka_core::{CredentialProof, Email, EmailError, IdentityId, Username, UsernameError};

use crate::models::Identity;
use crate::storage::{PersistenceError, Storage, StorageExt};

/// Storage key for the registered-identity set.
const IDENTITIES_KEY: &str = "identities";

/// Storage key for the active-session record.
const ACTIVE_SESSION_KEY: &str = "activeSession";

/// Errors that can occur during identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Invalid username on registration input.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Invalid email on registration input.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Another identity already holds the username or email.
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// No identity matches the supplied username and credential.
    #[error("invalid username or credential")]
    InvalidCredentials,

    /// The durable store could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// The registered-identity set and the active-session pointer.
///
/// Owns the `identities` and `activeSession` storage keys exclusively.
/// Every mutation persists synchronously before returning; a persistence
/// failure leaves the in-memory state exactly as it was.
pub struct IdentityStore {
    storage: Arc<dyn Storage>,
    inner: Mutex<IdentityState>,
}

struct IdentityState {
    /// Registered identities, in registration order.
    identities: Vec<Identity>,
    /// Active session. `None` until first read from storage; the inner
    /// `Option` is the session itself (None = anonymous).
    active: Option<Option<Identity>>,
}

impl IdentityStore {
    /// Open the store over `storage`, loading the persisted identity set.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the identity set cannot be read.
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, PersistenceError> {
        let identities = storage.get_record(IDENTITIES_KEY)?.unwrap_or_default();
        Ok(Self {
            storage,
            inner: Mutex::new(IdentityState {
                identities,
                active: None,
            }),
        })
    }

    // A poisoned lock still guards a structurally intact state.
    fn state(&self) -> MutexGuard<'_, IdentityState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new identity.
    ///
    /// The active session is not touched: registering does not log in.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidUsername`] or
    /// [`IdentityError::InvalidEmail`] if the input fails validation.
    /// Returns [`IdentityError::Conflict`] if the username or email is
    /// already taken (case-sensitive exact match).
    pub fn register(
        &self,
        username: &str,
        email: &str,
        credential: &str,
    ) -> Result<Identity, IdentityError> {
        let username = Username::parse(username)?;
        let email = Email::parse(email)?;

        let mut state = self.state();

        if state.identities.iter().any(|i| i.username == username) {
            return Err(IdentityError::Conflict(
                "username already exists".to_owned(),
            ));
        }
        if state.identities.iter().any(|i| i.email == email) {
            return Err(IdentityError::Conflict("email already exists".to_owned()));
        }

        let identity = Identity {
            id: IdentityId::generate(),
            username,
            email,
            credential: CredentialProof::new(credential),
            created_at: Utc::now(),
        };

        let mut next = state.identities.clone();
        next.push(identity.clone());
        self.storage.put_record(IDENTITIES_KEY, &next)?;
        state.identities = next;

        tracing::debug!(id = %identity.id, username = %identity.username, "registered identity");
        Ok(identity)
    }

    /// Authenticate and open a session for the matching identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredentials`] unless some identity
    /// matches the username and credential exactly; the active session is
    /// left unchanged in that case.
    pub fn authenticate(
        &self,
        username: &str,
        credential: &str,
    ) -> Result<Identity, IdentityError> {
        let mut state = self.state();

        let identity = state
            .identities
            .iter()
            .find(|i| i.username.as_str() == username && i.credential.matches(credential))
            .cloned()
            .ok_or(IdentityError::InvalidCredentials)?;

        self.storage.put_record(ACTIVE_SESSION_KEY, &identity)?;
        state.active = Some(Some(identity.clone()));

        tracing::debug!(username = %identity.username, "session opened");
        Ok(identity)
    }

    /// Close the active session, if any. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the persisted session record cannot
    /// be deleted.
    pub fn end_session(&self) -> Result<(), PersistenceError> {
        let mut state = self.state();
        self.storage.remove(ACTIVE_SESSION_KEY)?;
        state.active = Some(None);
        tracing::debug!("session closed");
        Ok(())
    }

    /// The identity of the active session, or `None` when anonymous.
    ///
    /// The first call per process reconstitutes the session from storage;
    /// both outcomes are cached after that.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the persisted session record cannot
    /// be read or does not decode.
    pub fn current_identity(&self) -> Result<Option<Identity>, PersistenceError> {
        let mut state = self.state();
        if let Some(active) = &state.active {
            return Ok(active.clone());
        }

        let loaded = self.storage.get_record(ACTIVE_SESSION_KEY)?;
        state.active = Some(loaded.clone());
        Ok(loaded)
    }

    /// Whether a session is currently active.
    ///
    /// # Errors
    ///
    /// Same as [`Self::current_identity`].
    pub fn is_authenticated(&self) -> Result<bool, PersistenceError> {
        Ok(self.current_identity()?.is_some())
    }

    /// All registered identities, in registration order.
    ///
    /// Returns a defensive copy; mutating it does not touch the store.
    #[must_use]
    pub fn list_identities(&self) -> Vec<Identity> {
        self.state().identities.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn open_store() -> IdentityStore {
        IdentityStore::open(Arc::new(MemoryStorage::new())).unwrap()
    }

    #[test]
    fn test_register_assigns_unique_ids() {
        let store = open_store();
        let a = store.register("alice", "alice@example.com", "pw-a").unwrap();
        let b = store.register("bob", "bob@example.com", "pw-b").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list_identities().len(), 2);
    }

    #[test]
    fn test_register_does_not_open_session() {
        let store = open_store();
        store.register("alice", "alice@example.com", "pw").unwrap();
        assert!(!store.is_authenticated().unwrap());
    }

    #[test]
    fn test_register_duplicate_username_conflicts() {
        let store = open_store();
        store.register("alice", "alice@example.com", "pw").unwrap();
        let result = store.register("alice", "other@example.com", "pw");
        assert!(matches!(result, Err(IdentityError::Conflict(_))));
    }

    #[test]
    fn test_register_duplicate_email_conflicts() {
        let store = open_store();
        store.register("alice", "same@example.com", "pw").unwrap();
        let result = store.register("bob", "same@example.com", "pw");
        assert!(matches!(result, Err(IdentityError::Conflict(_))));
        // both fields distinct succeeds
        assert!(store.register("bob", "bob@example.com", "pw").is_ok());
    }

    #[test]
    fn test_register_is_case_sensitive() {
        let store = open_store();
        store.register("alice", "alice@example.com", "pw").unwrap();
        assert!(store.register("Alice", "Alice@example.com", "pw").is_ok());
    }

    #[test]
    fn test_register_rejects_invalid_input() {
        let store = open_store();
        assert!(matches!(
            store.register("", "alice@example.com", "pw"),
            Err(IdentityError::InvalidUsername(_))
        ));
        assert!(matches!(
            store.register("alice", "not-an-email", "pw"),
            Err(IdentityError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_authenticate_success_opens_session() {
        let store = open_store();
        let registered = store.register("alice", "alice@example.com", "pw").unwrap();
        let authenticated = store.authenticate("alice", "pw").unwrap();
        assert_eq!(authenticated.id, registered.id);

        let current = store.current_identity().unwrap().unwrap();
        assert_eq!(current.id, registered.id);
    }

    #[test]
    fn test_authenticate_wrong_credential_leaves_session() {
        let store = open_store();
        store.register("alice", "alice@example.com", "pw").unwrap();

        assert!(matches!(
            store.authenticate("alice", "wrong"),
            Err(IdentityError::InvalidCredentials)
        ));
        assert_eq!(store.current_identity().unwrap(), None);

        // and an established session survives a later failed attempt
        store.authenticate("alice", "pw").unwrap();
        assert!(matches!(
            store.authenticate("alice", "wrong"),
            Err(IdentityError::InvalidCredentials)
        ));
        assert!(store.is_authenticated().unwrap());
    }

    #[test]
    fn test_end_session_is_idempotent() {
        let store = open_store();
        store.register("alice", "alice@example.com", "pw").unwrap();
        store.authenticate("alice", "pw").unwrap();

        store.end_session().unwrap();
        store.end_session().unwrap();
        assert!(!store.is_authenticated().unwrap());
    }

    #[test]
    fn test_session_reconstitutes_from_storage() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

        {
            let store = IdentityStore::open(Arc::clone(&storage)).unwrap();
            store.register("alice", "alice@example.com", "pw").unwrap();
            store.authenticate("alice", "pw").unwrap();
        }

        // a fresh store over the same storage sees the persisted session
        let store = IdentityStore::open(storage).unwrap();
        let current = store.current_identity().unwrap().unwrap();
        assert_eq!(current.username.as_str(), "alice");
    }

    #[test]
    fn test_list_identities_is_defensive_copy() {
        let store = open_store();
        store.register("alice", "alice@example.com", "pw").unwrap();

        let mut listed = store.list_identities();
        listed.clear();
        assert_eq!(store.list_identities().len(), 1);
    }
}
