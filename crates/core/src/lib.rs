//! Lavka Core - Shared types library.
//!
//! This crate provides common types used across all Lavka components:
//! - `storefront` - Session and cart state management
//! - `cli` - Command-line front-end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O and no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, usernames, emails,
//!   credentials, and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
