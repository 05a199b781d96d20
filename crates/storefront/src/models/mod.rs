//! Domain models.
//!
//! These types represent validated domain objects separate from the store
//! code that manages them. Persisted records serialize with camelCase field
//! names, which is the on-disk layout the stores commit to.

pub mod cart;
pub mod identity;
pub mod product;

pub use cart::{CartLine, OwnerKey};
pub use identity::Identity;
pub use product::Product;
