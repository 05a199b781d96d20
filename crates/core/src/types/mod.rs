//! Core types for Lavka.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod price;
pub mod username;

pub use credential::CredentialProof;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use username::{Username, UsernameError};
