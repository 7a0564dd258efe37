//! Credential verification adapter.
//!
//! Hashing is a thin wrapper around an external primitive; the core only
//! consumes it through the [`CredentialVerifier`] port. This adapter keeps
//! the demo deployment self-contained with an unsalted SHA-256 digest.
//! A production directory would swap in its own verifier behind the same
//! port.

use sha2::{Digest, Sha256};

use crate::domain::ports::CredentialVerifier;
use crate::domain::PasswordHash;

/// SHA-256 digest verifier for externally provisioned credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256CredentialVerifier;

impl Sha256CredentialVerifier {
    /// Digest a plaintext password into the stored credential form.
    ///
    /// Used by provisioning; request handling only ever verifies.
    pub fn digest(password: &str) -> PasswordHash {
        let encoded = hex::encode(Sha256::digest(password.as_bytes()));
        PasswordHash::new(encoded)
            .unwrap_or_else(|err| panic!("sha-256 digest is never empty: {err}"))
    }
}

impl CredentialVerifier for Sha256CredentialVerifier {
    fn verify(&self, candidate: &str, credential: &PasswordHash) -> bool {
        hex::encode(Sha256::digest(candidate.as_bytes())) == credential.as_str()
    }
}
