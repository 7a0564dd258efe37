//! Team listing service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::require_manager;
use crate::domain::ports::{TeamQuery, UserRepository, UserStoreError};
use crate::domain::{Error, User, UserId};

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

/// Implements [`TeamQuery`] over the identity store.
#[derive(Clone)]
pub struct TeamService<U> {
    users: Arc<U>,
}

impl<U> TeamService<U> {
    /// Create a new service over the identity store.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> TeamService<U>
where
    U: UserRepository,
{
    async fn require_actor(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

#[async_trait]
impl<U> TeamQuery for TeamService<U>
where
    U: UserRepository,
{
    async fn list_team(&self, actor: &UserId) -> Result<Vec<User>, Error> {
        let actor = self.require_actor(actor).await?;
        require_manager(&actor)?;

        self.users
            .list_reports(actor.id())
            .await
            .map_err(map_user_store_error)
    }
}
