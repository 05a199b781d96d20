//! Cart domain types.

use core::fmt;

use serde::{Deserialize, Serialize};

use lavka_core::{IdentityId, Price, ProductId};

/// The owner marker used for the not-yet-authenticated cart.
const ANONYMOUS_MARKER: &str = "anonymous";

/// Storage key prefix for cart records.
const CART_KEY_PREFIX: &str = "cart:";

/// One product's entry in a cart.
///
/// The unit price is a snapshot taken when the line is first added; later
/// additions of the same product raise the quantity but never refresh the
/// price. Quantity is always at least 1 - a line that would drop to zero is
/// removed instead of stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The product this line refers to. The product itself is owned by the
    /// catalog; only the reference and the price snapshot live here.
    pub product_id: ProductId,
    /// Unit price recorded when the line was first added.
    pub unit_price: Price,
    /// Number of units, always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// The extended price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.extended(self.quantity)
    }
}

/// The key a cart is partitioned under: a specific identity, or the one
/// shared anonymous cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKey {
    /// The shared cart for the not-yet-authenticated session.
    Anonymous,
    /// A specific registered identity's cart.
    Identity(IdentityId),
}

impl OwnerKey {
    /// Render the storage key this owner's cart is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> String {
        match self {
            Self::Anonymous => format!("{CART_KEY_PREFIX}{ANONYMOUS_MARKER}"),
            Self::Identity(id) => format!("{CART_KEY_PREFIX}{id}"),
        }
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => write!(f, "{ANONYMOUS_MARKER}"),
            Self::Identity(id) => write!(f, "{id}"),
        }
    }
}

impl From<IdentityId> for OwnerKey {
    fn from(id: IdentityId) -> Self {
        Self::Identity(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_storage_key() {
        assert_eq!(OwnerKey::Anonymous.storage_key(), "cart:anonymous");
    }

    #[test]
    fn test_identity_storage_key() {
        let id = IdentityId::generate();
        assert_eq!(
            OwnerKey::Identity(id).storage_key(),
            format!("cart:{id}")
        );
    }

    #[test]
    fn test_line_total() {
        let line = CartLine {
            product_id: ProductId::new(2),
            unit_price: Price::from(25_000_u32),
            quantity: 3,
        };
        assert_eq!(line.line_total(), Price::from(75_000_u32));
    }

    #[test]
    fn test_persisted_layout_is_camel_case() {
        let line = CartLine {
            product_id: ProductId::new(1),
            unit_price: Price::from(50_000_u32),
            quantity: 2,
        };

        let value = serde_json::to_value(&line).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("productId"));
        assert!(object.contains_key("unitPrice"));
        assert!(object.contains_key("quantity"));
    }
}
