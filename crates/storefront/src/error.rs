//! Session-level error aggregation.
//!
//! The stores surface their own specific error kinds; this type exists for
//! callers driving the wired-up [`crate::state::ShopSession`], where an
//! operation can fail on either side. No error is swallowed or reworded on
//! the way through - presentation-facing formatting belongs to the caller.

use thiserror::Error;

use crate::storage::PersistenceError;
use crate::stores::{CartError, IdentityError};

/// Any failure from a session-level operation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Identity operation failed.
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Cart operation failed.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// The durable store could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for `SessionError`.
pub type Result<T> = std::result::Result<T, SessionError>;
