//! Lavka Storefront library.
//!
//! The client-held shopping session core: a registered-identity store and a
//! per-identity cart store, both persisting through an injected key-value
//! [`storage`] capability, wired together by [`state::ShopSession`].
//!
//! The presentation layer (CLI, or whatever front-end drives this) consumes
//! the read/query operations and invokes the mutation operations; it gets no
//! change notifications and re-queries after each mutation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
pub mod stores;
