//! End-to-end session scenarios: registration, login, logout, and the
//! guest-cart handover between them.

#![allow(clippy::unwrap_used)]

use lavka_integration_tests::{memory_session, product};
use lavka_storefront::error::SessionError;
use lavka_storefront::models::{CartLine, OwnerKey};
use lavka_storefront::storage::{Storage, StorageExt};
use lavka_storefront::stores::IdentityError;

#[test]
fn guest_cart_follows_admin_login() {
    let (storage, session) = memory_session();
    session
        .identities()
        .register("admin", "admin@example.com", "admin123")
        .unwrap();

    // the guest fills a cart: 2 × product 1 at 50000
    session.carts().add_item(&product(1, 50_000), 2).unwrap();

    let identity = session.sign_in("admin", "admin123").unwrap();

    // the identity's cart now holds exactly the migrated lines...
    let owner = OwnerKey::Identity(identity.id);
    let migrated: Vec<CartLine> = storage
        .get_record(&owner.storage_key())
        .unwrap()
        .unwrap();
    assert_eq!(migrated, session.carts().items().unwrap());
    assert_eq!(migrated.first().unwrap().quantity, 2);
    assert_eq!(
        migrated.first().unwrap().unit_price,
        product(1, 50_000).price
    );

    // ...and the anonymous cart entry is gone, not merely emptied
    assert_eq!(
        storage.get(&OwnerKey::Anonymous.storage_key()).unwrap(),
        None
    );
}

#[test]
fn sign_up_registers_authenticates_and_migrates() {
    let (_, session) = memory_session();

    session.carts().add_item(&product(2, 25_000), 1).unwrap();
    let identity = session.sign_up("alice", "alice@example.com", "pw").unwrap();

    assert_eq!(
        session.identities().current_identity().unwrap().unwrap().id,
        identity.id
    );
    assert_eq!(session.carts().total_count().unwrap(), 1);
}

#[test]
fn failed_login_preserves_current_session() {
    let (_, session) = memory_session();
    session
        .identities()
        .register("admin", "admin@example.com", "admin123")
        .unwrap();

    // anonymous before, anonymous after
    let result = session.sign_in("admin", "wrong-password");
    assert!(matches!(
        result,
        Err(SessionError::Identity(IdentityError::InvalidCredentials))
    ));
    assert_eq!(session.identities().current_identity().unwrap(), None);

    // an established session also survives a failed attempt
    session.sign_in("admin", "admin123").unwrap();
    let result = session.sign_in("admin", "wrong-password");
    assert!(result.is_err());
    assert_eq!(
        session
            .identities()
            .current_identity()
            .unwrap()
            .unwrap()
            .username
            .as_str(),
        "admin"
    );
}

#[test]
fn logout_switches_back_to_the_anonymous_cart() {
    let (_, session) = memory_session();
    session.sign_up("alice", "alice@example.com", "pw").unwrap();
    session.carts().add_item(&product(1, 50_000), 1).unwrap();

    session.sign_out().unwrap();
    assert!(!session.identities().is_authenticated().unwrap());
    assert!(session.carts().items().unwrap().is_empty());

    // logging back in finds the cart where it was left; the empty anonymous
    // cart record does not displace it
    session.sign_in("alice", "pw").unwrap();
    assert_eq!(session.carts().total_count().unwrap(), 1);
}

#[test]
fn duplicate_registration_conflicts() {
    let (_, session) = memory_session();
    session
        .identities()
        .register("alice", "shared@example.com", "pw")
        .unwrap();

    // same email, different username
    let result = session
        .identities()
        .register("bob", "shared@example.com", "pw");
    assert!(matches!(result, Err(IdentityError::Conflict(_))));

    // both fields distinct succeeds
    assert!(
        session
            .identities()
            .register("bob", "bob@example.com", "pw")
            .is_ok()
    );
}

#[test]
fn second_login_does_not_steal_an_existing_cart() {
    let (storage, session) = memory_session();
    session.sign_up("alice", "alice@example.com", "pw").unwrap();
    session.carts().add_item(&product(3, 35_000), 1).unwrap();
    session.sign_out().unwrap();

    // a different guest fills the shared anonymous cart
    session.carts().add_item(&product(4, 15_000), 2).unwrap();

    session.sign_in("alice", "pw").unwrap();

    // alice keeps her own cart; the guest lines stay under the anonymous key
    let ids: Vec<i32> = session
        .carts()
        .items()
        .unwrap()
        .iter()
        .map(|l| l.product_id.as_i32())
        .collect();
    assert_eq!(ids, vec![3]);

    let guest: Vec<CartLine> = storage
        .get_record(&OwnerKey::Anonymous.storage_key())
        .unwrap()
        .unwrap();
    assert_eq!(guest.first().unwrap().product_id.as_i32(), 4);
}
