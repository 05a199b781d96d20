//! Cart commands: show, add, remove, set, clear, checkout.

use thiserror::Error;

use lavka_core::ProductId;
use lavka_storefront::state::ShopSession;
use lavka_storefront::stores::CartError;

use super::catalog;

/// Errors that can occur driving the cart from the command line.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The requested product is not in the catalog.
    #[error("no catalog product with id {0}")]
    UnknownProduct(i32),

    /// The underlying cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Show the cart's lines and totals.
///
/// # Errors
///
/// Returns [`CartCommandError`] if the cart cannot be read.
#[allow(clippy::print_stdout)]
pub fn show(session: &ShopSession) -> Result<(), CartCommandError> {
    let items = session.carts().items()?;
    if items.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    for line in &items {
        let name = catalog::find(line.product_id)
            .map_or_else(|| format!("product {}", line.product_id), |p| p.name);
        println!(
            "{:>3}  {:<14} {:>8} × {:<3} = {}",
            line.product_id,
            name,
            line.unit_price,
            line.quantity,
            line.line_total()
        );
    }

    println!(
        "Total: {} ({} items)",
        session.carts().total_price()?,
        session.carts().total_count()?
    );
    Ok(())
}

/// Add a catalog product to the cart.
///
/// # Errors
///
/// Returns [`CartCommandError::UnknownProduct`] if the id is not in the
/// catalog, or the cart's error if the mutation fails.
#[allow(clippy::print_stdout)]
pub fn add(session: &ShopSession, product_id: i32, quantity: u32) -> Result<(), CartCommandError> {
    let product = catalog::find(ProductId::new(product_id))
        .ok_or(CartCommandError::UnknownProduct(product_id))?;

    session.carts().add_item(&product, quantity)?;
    println!("\"{}\" added to your cart.", product.name);
    Ok(())
}

/// Remove a product's line from the cart.
///
/// # Errors
///
/// Returns [`CartCommandError`] if the cart cannot be written.
#[allow(clippy::print_stdout)]
pub fn remove(session: &ShopSession, product_id: i32) -> Result<(), CartCommandError> {
    session.carts().remove_item(ProductId::new(product_id))?;
    println!("Removed.");
    Ok(())
}

/// Set a line's quantity; zero removes the line.
///
/// # Errors
///
/// Returns [`CartCommandError`] if no line exists for a positive quantity,
/// or the cart cannot be written.
#[allow(clippy::print_stdout)]
pub fn set(session: &ShopSession, product_id: i32, quantity: u32) -> Result<(), CartCommandError> {
    session
        .carts()
        .set_quantity(ProductId::new(product_id), quantity)?;
    println!("Updated.");
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns [`CartCommandError`] if the cart cannot be written.
#[allow(clippy::print_stdout)]
pub fn clear(session: &ShopSession) -> Result<(), CartCommandError> {
    session.carts().clear()?;
    println!("Cart cleared.");
    Ok(())
}

/// Report the order total and empty the cart.
///
/// # Errors
///
/// Returns [`CartCommandError`] if the cart cannot be read or written.
#[allow(clippy::print_stdout)]
pub fn checkout(session: &ShopSession) -> Result<(), CartCommandError> {
    let count = session.carts().total_count()?;
    if count == 0 {
        println!("Your cart is empty - nothing to check out.");
        return Ok(());
    }

    let total = session.carts().total_price()?;
    session.carts().clear()?;
    println!("Order placed: {count} items for {total}. Thank you!");
    Ok(())
}
