//! Directory-backed authentication services.
//!
//! Implements the [`LoginService`] and [`ProfileQuery`] driving ports over
//! the identity store and the credential verification collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    CredentialVerifier, LoginService, ProfileQuery, UserRepository, UserStoreError,
};
use crate::domain::{Error, Identity, LoginCredentials, User, UserId};

/// Single message for both unknown email and wrong password, so a probe
/// cannot tell which one failed.
const BAD_CREDENTIALS: &str = "incorrect email or password";

fn map_user_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserStoreError::Query { message } => Error::internal(format!("user store error: {message}")),
        UserStoreError::DuplicateEmail { email } => {
            Error::internal(format!("user store error: duplicate email {email}"))
        }
    }
}

/// Authentication service over the identity store.
#[derive(Clone)]
pub struct AuthService<U, V> {
    users: Arc<U>,
    verifier: Arc<V>,
}

impl<U, V> AuthService<U, V> {
    /// Create a new service from the identity store and verifier.
    pub fn new(users: Arc<U>, verifier: Arc<V>) -> Self {
        Self { users, verifier }
    }
}

#[async_trait]
impl<U, V> LoginService for AuthService<U, V>
where
    U: UserRepository,
    V: CredentialVerifier,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_store_error)?;

        let Some(user) = user else {
            debug!(email = %credentials.email(), "login rejected: unknown email");
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        };

        if !self.verifier.verify(credentials.password(), user.credential()) {
            debug!(user_id = %user.id(), "login rejected: bad password");
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        }

        Ok(Identity {
            id: *user.id(),
            role: user.role(),
        })
    }
}

#[async_trait]
impl<U, V> ProfileQuery for AuthService<U, V>
where
    U: UserRepository,
    V: CredentialVerifier,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_store_error)?;

        user.ok_or_else(|| {
            warn!(%user_id, "session references a user no longer in the directory");
            Error::unauthorized("login required")
        })
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
