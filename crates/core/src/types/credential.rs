//! Opaque credential proof type.
//!
//! Credential handling is delegated to an external authentication provider;
//! the session core only stores an opaque proof and checks it for exact
//! equality. There is no hashing here and no claim to be one.

use serde::{Deserialize, Serialize};

/// An opaque credential proof supplied by the authentication provider.
///
/// The proof participates in persistence (identities round-trip through
/// storage with their proof attached), so it serializes transparently, but
/// `Debug` output redacts the value to keep it out of logs and panic
/// messages.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CredentialProof(String);

impl CredentialProof {
    /// Create a credential proof from the provider-supplied token.
    #[must_use]
    pub fn new(proof: impl Into<String>) -> Self {
        Self(proof.into())
    }

    /// Check the proof against a caller-supplied token, exact match.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Debug for CredentialProof {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CredentialProof").field(&"[REDACTED]").finish()
    }
}

impl From<&str> for CredentialProof {
    fn from(proof: &str) -> Self {
        Self::new(proof)
    }
}

impl From<String> for CredentialProof {
    fn from(proof: String) -> Self {
        Self(proof)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_exact() {
        let proof = CredentialProof::new("admin123");
        assert!(proof.matches("admin123"));
        assert!(!proof.matches("Admin123"));
        assert!(!proof.matches(""));
    }

    #[test]
    fn test_debug_redacts() {
        let proof = CredentialProof::new("super-secret");
        let debug_output = format!("{proof:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let proof = CredentialProof::new("admin123");
        let json = serde_json::to_string(&proof).unwrap();
        assert_eq!(json, "\"admin123\"");

        let parsed: CredentialProof = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, proof);
    }
}
