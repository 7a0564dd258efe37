//! Driving port for team listings.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for listing a manager's direct reports.
#[async_trait]
pub trait TeamQuery: Send + Sync {
    /// Return the actor's direct reports.
    ///
    /// Manager-only: employees receive a forbidden error. The listing is
    /// never recursive.
    async fn list_team(&self, actor: &UserId) -> Result<Vec<User>, Error>;
}
