//! Seed the demo identity.
//!
//! The original shop shipped with a ready-made `admin` account so the login
//! flow could be tried immediately; this command reproduces it.

use lavka_storefront::state::ShopSession;
use lavka_storefront::stores::IdentityError;

/// Username of the seeded demo account.
const DEMO_USERNAME: &str = "admin";

/// Email of the seeded demo account.
const DEMO_EMAIL: &str = "admin@example.com";

/// Credential of the seeded demo account.
const DEMO_PASSWORD: &str = "admin123";

/// Register the demo identity if it is not already present.
///
/// Does not log the identity in - seeding is registration only.
///
/// # Errors
///
/// Returns [`IdentityError`] on persistence failure; an existing demo
/// account is not an error.
#[allow(clippy::print_stdout)]
pub fn demo_identity(session: &ShopSession) -> Result<(), IdentityError> {
    match session
        .identities()
        .register(DEMO_USERNAME, DEMO_EMAIL, DEMO_PASSWORD)
    {
        Ok(identity) => {
            println!(
                "Seeded demo identity {} / {DEMO_PASSWORD} (id {}).",
                identity.username, identity.id
            );
            Ok(())
        }
        Err(IdentityError::Conflict(_)) => {
            println!("Demo identity already present.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
