//! Identity domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lavka_core::{CredentialProof, Email, IdentityId, Username};

/// A registered identity (domain type).
///
/// The username and email are each unique across all identities at all
/// times, compared case-sensitively. The id is assigned at registration and
/// never changes or gets reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Unique identity ID.
    pub id: IdentityId,
    /// Unique username.
    pub username: Username,
    /// Unique email address.
    pub email: Email,
    /// Opaque credential proof from the authentication provider.
    pub credential: CredentialProof,
    /// When the identity was registered.
    pub created_at: DateTime<Utc>,
}
