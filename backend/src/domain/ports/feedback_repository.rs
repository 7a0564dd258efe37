//! Driven port for the feedback store.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::access::FeedbackDirection;
use crate::domain::{Feedback, FeedbackId, UserId};

/// Persistence errors raised by [`FeedbackRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackStoreError {
    /// Store connection could not be established.
    #[error("feedback store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("feedback store query failed: {message}")]
    Query { message: String },
    /// An update targeted an id the store has never seen.
    #[error("feedback {id} is not persisted")]
    UnknownId { id: String },
}

impl FeedbackStoreError {
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

    /// Helper for updates against unknown ids.
    pub fn unknown_id(id: impl Into<String>) -> Self {
        Self::UnknownId { id: id.into() }
    }
}

/// Driven port for storing and retrieving feedback records.
///
/// `update` replaces the whole record; concurrent writers to the same id
/// resolve last-writer-wins, which the scoped operations accept. No delete
/// exists because the lifecycle has none.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist a newly created record.
    async fn insert(&self, feedback: &Feedback) -> Result<(), FeedbackStoreError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &FeedbackId) -> Result<Option<Feedback>, FeedbackStoreError>;

    /// All records matching the access policy's scoping predicate for
    /// `actor` in the given direction.
    async fn list_scoped(
        &self,
        direction: FeedbackDirection,
        actor: &UserId,
    ) -> Result<Vec<Feedback>, FeedbackStoreError>;

    /// Replace a persisted record with `feedback`.
    async fn update(&self, feedback: &Feedback) -> Result<(), FeedbackStoreError>;
}
