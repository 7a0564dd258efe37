//! Driving port for the feedback lifecycle mutations.

use async_trait::async_trait;

use crate::domain::{Commentary, Error, FeedbackId, FeedbackPatch, Sentiment, UserId};

use super::feedback_query::AttributedFeedback;

/// Validated payload for creating a feedback record.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFeedback {
    /// Subject employee; must be a direct report of the acting manager.
    pub employee_id: UserId,
    /// Required strengths commentary.
    pub strengths: Commentary,
    /// Required improvements commentary.
    pub improvements: Commentary,
    /// Sentiment tag.
    pub sentiment: Sentiment,
}

/// Domain use-case port for creating, editing, and acknowledging feedback.
#[async_trait]
pub trait FeedbackCommand: Send + Sync {
    /// Create a record for a direct report, atomically, in the pending
    /// state. An off-team or unknown subject surfaces as not-found.
    async fn create(
        &self,
        actor: &UserId,
        request: CreateFeedback,
    ) -> Result<AttributedFeedback, Error>;

    /// Apply a partial edit to a record the actor authored. Ids outside
    /// the actor's authored set surface as not-found.
    async fn update(
        &self,
        actor: &UserId,
        id: &FeedbackId,
        patch: FeedbackPatch,
    ) -> Result<AttributedFeedback, Error>;

    /// Acknowledge a record addressed to the actor. Idempotent: repeat
    /// calls succeed without changing the acknowledgment timestamp.
    async fn acknowledge(
        &self,
        actor: &UserId,
        id: &FeedbackId,
    ) -> Result<AttributedFeedback, Error>;
}
