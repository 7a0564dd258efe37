//! Driving port for resolving the current identity's profile.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading the authenticated user's profile.
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Return the profile for the session's user id.
    ///
    /// A stale id (user removed since the session was issued) surfaces as
    /// an unauthorized error, forcing a fresh login.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;
}
