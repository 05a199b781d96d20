//! Account commands: register, login, logout, whoami, users.

use lavka_storefront::error::SessionError;
use lavka_storefront::state::ShopSession;
use lavka_storefront::storage::PersistenceError;

/// Register a new identity and log it in.
///
/// # Errors
///
/// Returns [`SessionError`] if validation fails, the username or email is
/// taken, or the stores cannot persist.
#[allow(clippy::print_stdout)]
pub fn register(
    session: &ShopSession,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), SessionError> {
    let identity = session.sign_up(username, email, password)?;
    println!("Welcome, {}! Your account is ready.", identity.username);
    Ok(())
}

/// Log in and migrate the guest cart.
///
/// # Errors
///
/// Returns [`SessionError`] on bad credentials or persistence failure.
#[allow(clippy::print_stdout)]
pub fn login(session: &ShopSession, username: &str, password: &str) -> Result<(), SessionError> {
    let identity = session.sign_in(username, password)?;
    println!("Welcome back, {}!", identity.username);
    Ok(())
}

/// Log out.
///
/// # Errors
///
/// Returns [`SessionError`] if the session record cannot be deleted.
#[allow(clippy::print_stdout)]
pub fn logout(session: &ShopSession) -> Result<(), SessionError> {
    session.sign_out()?;
    println!("Logged out.");
    Ok(())
}

/// Show the active identity, if any.
///
/// # Errors
///
/// Returns [`PersistenceError`] if the session record cannot be read.
#[allow(clippy::print_stdout)]
pub fn whoami(session: &ShopSession) -> Result<(), PersistenceError> {
    match session.identities().current_identity()? {
        Some(identity) => println!(
            "{} <{}> (registered {})",
            identity.username,
            identity.email,
            identity.created_at.format("%Y-%m-%d")
        ),
        None => println!("Not logged in."),
    }
    Ok(())
}

/// List registered identities in registration order.
#[allow(clippy::print_stdout)]
pub fn users(session: &ShopSession) {
    let identities = session.identities().list_identities();
    if identities.is_empty() {
        println!("No registered identities.");
        return;
    }

    for identity in identities {
        println!(
            "{:<20} {:<30} {}",
            identity.username,
            identity.email,
            identity.created_at.format("%Y-%m-%d %H:%M")
        );
    }
}
