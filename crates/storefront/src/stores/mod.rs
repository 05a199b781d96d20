//! The session stores.
//!
//! Two process-wide stores sharing one storage handle:
//!
//! - [`IdentityStore`] owns the registered-identity set and the
//!   active-session pointer.
//! - [`CartStore`] owns every cart, keyed by owner, and reads the active
//!   identity through [`IdentityStore`] to resolve the current key.
//!
//! Construct each once at process start (see [`crate::state::ShopSession`])
//! and share by handle.

pub mod cart;
pub mod identity;

pub use cart::{CartError, CartStore};
pub use identity::{IdentityError, IdentityStore};
