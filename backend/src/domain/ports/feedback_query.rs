//! Driving port for role-scoped feedback listings.

use async_trait::async_trait;

use crate::domain::{Error, Feedback, UserId};

/// Fallback shown when a referenced user has vanished from the directory.
pub const UNKNOWN_USER_NAME: &str = "Unknown";

/// A feedback record joined with the display names of both parties.
///
/// Responses always carry names so clients never have to re-query the
/// directory; a dangling reference falls back to [`UNKNOWN_USER_NAME`].
#[derive(Debug, Clone, PartialEq)]
pub struct AttributedFeedback {
    /// The underlying record.
    pub feedback: Feedback,
    /// Display name of the authoring manager.
    pub manager_name: String,
    /// Display name of the subject employee.
    pub employee_name: String,
}

/// Domain use-case port for listing feedback visible to the actor.
#[async_trait]
pub trait FeedbackQuery: Send + Sync {
    /// Records the actor authored. Manager-only.
    async fn list_given(&self, actor: &UserId) -> Result<Vec<AttributedFeedback>, Error>;

    /// Records addressed to the actor. Any authenticated identity.
    async fn list_received(&self, actor: &UserId) -> Result<Vec<AttributedFeedback>, Error>;
}
