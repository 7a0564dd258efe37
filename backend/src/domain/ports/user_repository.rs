//! Driven port for the identity store.
//!
//! Adapters expose directory lookups through strongly typed errors so the
//! domain maps failures into predictable variants instead of returning
//! `anyhow::Result`. The store is read-only from the core's perspective;
//! `insert` exists solely for external provisioning (seeding, tests).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{EmailAddress, User, UserId};

/// Persistence errors raised by [`UserRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
    /// Insert would violate the unique email constraint.
    #[error("email {email} is already provisioned")]
    DuplicateEmail { email: String },
}

impl UserStoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-email violations.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Driven port for reading (and provisioning) directory users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Provision a user record. Fails on a duplicate email.
    async fn insert(&self, user: &User) -> Result<(), UserStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by login email.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError>;

    /// All users whose manager reference equals `manager_id`. Direct
    /// reports only; empty when none.
    async fn list_reports(&self, manager_id: &UserId) -> Result<Vec<User>, UserStoreError>;
}
