//! The static demo catalog.
//!
//! Products are owned here, on the presentation side; the session core only
//! ever sees the `Product` records it is handed.

use lavka_core::{Price, ProductId};
use lavka_storefront::models::Product;

/// The demo catalog.
#[must_use]
pub fn products() -> Vec<Product> {
    let entries: [(i32, &str, u32, &str, &str); 6] = [
        (
            1,
            "Gaming laptop",
            50_000,
            "💻",
            "Powerful laptop for work and play with an Intel Core i7 processor",
        ),
        (
            2,
            "Smartphone",
            25_000,
            "📱",
            "Modern smartphone with an excellent 48 MP camera",
        ),
        (
            3,
            "Tablet",
            35_000,
            "📟",
            "Light and capable tablet with a 10-inch display",
        ),
        (
            4,
            "Headphones",
            15_000,
            "🎧",
            "Wireless noise-cancelling headphones",
        ),
        (
            5,
            "Smart watch",
            12_000,
            "⌚",
            "Smart watch with activity and sleep tracking",
        ),
        (
            6,
            "Camera",
            45_000,
            "📷",
            "DSLR camera for professional photography",
        ),
    ];

    entries
        .into_iter()
        .map(|(id, name, price, glyph, description)| Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::from(price),
            display_glyph: glyph.to_owned(),
            description: description.to_owned(),
        })
        .collect()
}

/// Look a product up by catalog ID.
#[must_use]
pub fn find(product_id: ProductId) -> Option<Product> {
    products().into_iter().find(|p| p.id == product_id)
}

/// Print the catalog.
#[allow(clippy::print_stdout)]
pub fn list() {
    for product in products() {
        println!(
            "{:>3}  {} {:<14} {:>8}  {}",
            product.id, product.display_glyph, product.name, product.price, product.description
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let products = products();
        for product in &products {
            assert_eq!(
                products.iter().filter(|p| p.id == product.id).count(),
                1,
                "duplicate catalog id {}",
                product.id
            );
        }
    }

    #[test]
    fn test_find_known_and_unknown() {
        assert!(find(ProductId::new(1)).is_some());
        assert!(find(ProductId::new(99)).is_none());
    }
}
