//! Product record consumed from the catalog.

use serde::{Deserialize, Serialize};

use lavka_core::{Price, ProductId};

/// A catalog product.
///
/// Products are owned by the presentation layer's catalog and are read-only
/// as far as this crate is concerned: the cart store copies `id` and `price`
/// into a [`super::CartLine`] at add time and never looks at the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog-assigned product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current price.
    pub price: Price,
    /// Short glyph shown next to the name (the catalog uses emoji).
    pub display_glyph: String,
    /// Longer display description.
    pub description: String,
}
