//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. HTTP handler tests substitute a test double instead of
//! wiring a directory.

use async_trait::async_trait;

use crate::domain::{Error, Identity, LoginCredentials};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller; both surface the same unauthorized error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error>;
}
