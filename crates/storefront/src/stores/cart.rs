//! Cart store: per-owner cart lines, totals, and guest-cart migration.

use std::sync::Arc;

use thiserror::Error;

use lavka_core::{IdentityId, Price, ProductId};

use crate::models::{CartLine, OwnerKey, Product};
use crate::storage::{PersistenceError, Storage, StorageExt};
use crate::stores::IdentityStore;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// A quantity of zero was passed where at least 1 is required.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// A quantity update referenced a product with no line in the cart.
    #[error("no cart line for product {0}")]
    LineNotFound(ProductId),

    /// The durable store could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// All carts, keyed by owner.
///
/// Owns every `cart:<owner>` storage key exclusively. Carts are not cached
/// in memory: each operation loads the owner's lines, applies the mutation,
/// and persists, so a failed persist leaves nothing half-applied behind.
/// The active identity is read (never written) through the identity store
/// to resolve the current owner key.
pub struct CartStore {
    storage: Arc<dyn Storage>,
    identities: Arc<IdentityStore>,
}

impl CartStore {
    /// Create the cart store over the shared storage and identity handles.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, identities: Arc<IdentityStore>) -> Self {
        Self {
            storage,
            identities,
        }
    }

    /// The key the current session's cart lives under: the active
    /// identity's id when authenticated, the anonymous key otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persistence`] if the active session cannot be
    /// read.
    pub fn resolve_owner_key(&self) -> Result<OwnerKey, CartError> {
        let owner = self
            .identities
            .current_identity()?
            .map_or(OwnerKey::Anonymous, |identity| {
                OwnerKey::Identity(identity.id)
            });
        Ok(owner)
    }

    fn load_lines(&self, owner: &OwnerKey) -> Result<Vec<CartLine>, CartError> {
        Ok(self
            .storage
            .get_record(&owner.storage_key())?
            .unwrap_or_default())
    }

    fn store_lines(&self, owner: &OwnerKey, lines: &[CartLine]) -> Result<(), CartError> {
        self.storage.put_record(&owner.storage_key(), lines)?;
        Ok(())
    }

    /// Add `quantity` units of `product` to the current cart.
    ///
    /// An existing line for the product gains the quantity and keeps its
    /// recorded unit price - the first price wins. A new line snapshots the
    /// product's current price.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is zero.
    pub fn add_item(&self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let owner = self.resolve_owner_key()?;
        let mut lines = self.load_lines(&owner)?;

        if let Some(line) = lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            lines.push(CartLine {
                product_id: product.id,
                unit_price: product.price,
                quantity,
            });
        }

        self.store_lines(&owner, &lines)?;
        tracing::debug!(product = %product.id, owner = %owner, "added cart line");
        Ok(())
    }

    /// Remove the line for `product_id` from the current cart.
    ///
    /// A missing line is not an error; the cart is persisted either way.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persistence`] if the cart cannot be read or
    /// written.
    pub fn remove_item(&self, product_id: ProductId) -> Result<(), CartError> {
        let owner = self.resolve_owner_key()?;
        let mut lines = self.load_lines(&owner)?;
        lines.retain(|l| l.product_id != product_id);
        self.store_lines(&owner, &lines)
    }

    /// Overwrite the quantity of the line for `product_id`.
    ///
    /// A quantity of zero is equivalent to [`Self::remove_item`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the quantity is positive but
    /// no line exists for the product.
    pub fn set_quantity(&self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        let owner = self.resolve_owner_key()?;
        let mut lines = self.load_lines(&owner)?;

        let line = lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or(CartError::LineNotFound(product_id))?;
        line.quantity = quantity;

        self.store_lines(&owner, &lines)
    }

    /// Empty the current cart.
    ///
    /// The owner's cart record stays present (empty), it is not deleted.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persistence`] if the cart cannot be written.
    pub fn clear(&self) -> Result<(), CartError> {
        let owner = self.resolve_owner_key()?;
        self.store_lines(&owner, &[])
    }

    /// The current cart's lines, in insertion order.
    ///
    /// Returns a defensive copy; mutating it does not touch the store.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persistence`] if the cart cannot be read.
    pub fn items(&self) -> Result<Vec<CartLine>, CartError> {
        let owner = self.resolve_owner_key()?;
        self.load_lines(&owner)
    }

    /// Total number of units across all lines, recomputed from the lines.
    ///
    /// # Errors
    ///
    /// Same as [`Self::items`].
    pub fn total_count(&self) -> Result<u64, CartError> {
        Ok(self
            .items()?
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum())
    }

    /// Total price across all lines, recomputed from the lines.
    ///
    /// # Errors
    ///
    /// Same as [`Self::items`].
    pub fn total_price(&self) -> Result<Price, CartError> {
        Ok(self.items()?.iter().map(CartLine::line_total).sum())
    }

    /// Hand the anonymous cart over to `target` at login/registration time.
    ///
    /// The transfer happens only if the anonymous cart exists and is
    /// non-empty, and `target` has no cart record of its own (an empty but
    /// present cart counts as one). After a transfer the anonymous entry is
    /// deleted entirely; in every other case the anonymous lines are left
    /// untouched and this is a no-op.
    ///
    /// Call exactly once per login/registration event, immediately after
    /// the identity becomes active and before any other cart operation.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persistence`] if the carts cannot be read or
    /// written.
    pub fn migrate_anonymous_cart(&self, target: IdentityId) -> Result<(), CartError> {
        let anonymous_key = OwnerKey::Anonymous.storage_key();

        let Some(lines) = self.storage.get_record::<Vec<CartLine>>(&anonymous_key)? else {
            return Ok(());
        };
        if lines.is_empty() {
            return Ok(());
        }

        let owner = OwnerKey::Identity(target);
        if self.storage.get(&owner.storage_key())?.is_some() {
            // the target already owns a cart; never overwrite it
            return Ok(());
        }

        self.storage.put_record(&owner.storage_key(), &lines)?;
        self.storage.remove(&anonymous_key)?;

        tracing::debug!(lines = lines.len(), owner = %owner, "migrated anonymous cart");
        Ok(())
    }
}
