//! Credential verification port.
//!
//! Hashing is an external collaborator; the domain only ever asks whether a
//! candidate password matches a stored digest.

use crate::domain::PasswordHash;

/// Check a plaintext candidate against an opaque stored digest.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    /// True iff `candidate` hashes to `credential`.
    fn verify(&self, candidate: &str, credential: &PasswordHash) -> bool;
}
