//! Feedback aggregate and its lifecycle.
//!
//! A feedback record is created directly in the pending state, may be
//! partially edited by its authoring manager at any time, and is
//! acknowledged at most once by its subject employee. Acknowledgment is
//! monotonic: no operation in this module can revert it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Validation errors returned by the feedback value-object constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackValidationError {
    EmptyId,
    InvalidId,
    EmptyCommentary,
    CommentaryTooLong { max: usize },
    UnknownSentiment,
}

impl fmt::Display for FeedbackValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "feedback id must not be empty"),
            Self::InvalidId => write!(f, "feedback id must be a valid UUID"),
            Self::EmptyCommentary => write!(f, "commentary must not be empty"),
            Self::CommentaryTooLong { max } => {
                write!(f, "commentary must be at most {max} characters")
            }
            Self::UnknownSentiment => {
                write!(f, "sentiment must be one of positive, neutral, negative")
            }
        }
    }
}

impl std::error::Error for FeedbackValidationError {}

/// Stable feedback identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeedbackId(Uuid);

impl FeedbackId {
    /// Validate and construct a [`FeedbackId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, FeedbackValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(FeedbackValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(FeedbackValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| FeedbackValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`FeedbackId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<FeedbackId> for String {
    fn from(value: FeedbackId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for FeedbackId {
    type Error = FeedbackValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Categorical tag on a feedback record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parse a sentiment from its wire representation.
    pub fn parse(raw: &str) -> Result<Self, FeedbackValidationError> {
        match raw {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            _ => Err(FeedbackValidationError::UnknownSentiment),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => f.write_str("positive"),
            Self::Neutral => f.write_str("neutral"),
            Self::Negative => f.write_str("negative"),
        }
    }
}

/// Required free-text body for strengths and improvements.
///
/// ## Invariants
/// - Non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commentary(String);

/// Maximum allowed length for a commentary body.
pub const COMMENTARY_MAX: usize = 4000;

impl Commentary {
    /// Validate and construct a [`Commentary`] from owned input.
    pub fn new(body: impl Into<String>) -> Result<Self, FeedbackValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(FeedbackValidationError::EmptyCommentary);
        }
        if body.chars().count() > COMMENTARY_MAX {
            return Err(FeedbackValidationError::CommentaryTooLong {
                max: COMMENTARY_MAX,
            });
        }
        Ok(Self(body))
    }
}

impl AsRef<str> for Commentary {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Commentary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Commentary> for String {
    fn from(value: Commentary) -> Self {
        value.0
    }
}

/// Partial update applied to a feedback record by its authoring manager.
///
/// Unset fields are left untouched (partial-update semantics, not
/// replace-semantics).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackPatch {
    pub strengths: Option<Commentary>,
    pub improvements: Option<Commentary>,
    pub sentiment: Option<Sentiment>,
}

impl FeedbackPatch {
    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.strengths.is_none() && self.improvements.is_none() && self.sentiment.is_none()
    }
}

/// A single piece of structured feedback from a manager to a direct report.
///
/// ## Invariants
/// - `manager_id` equalled the subject's manager at creation time; later
///   reporting changes do not retroactively invalidate the record.
/// - `acknowledged` is monotonic and `acknowledged_at` is set exactly when
///   it first transitions to `true`.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    id: FeedbackId,
    manager_id: UserId,
    employee_id: UserId,
    strengths: Commentary,
    improvements: Commentary,
    sentiment: Sentiment,
    acknowledged: bool,
    acknowledged_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Feedback {
    /// Create a new record directly in the pending state.
    ///
    /// Creation is atomic from the caller's perspective: every required
    /// field has already been validated by the time this constructor runs.
    pub fn create(
        id: FeedbackId,
        manager_id: UserId,
        employee_id: UserId,
        strengths: Commentary,
        improvements: Commentary,
        sentiment: Sentiment,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            manager_id,
            employee_id,
            strengths,
            improvements,
            sentiment,
            acknowledged: false,
            acknowledged_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stable feedback identifier.
    pub fn id(&self) -> &FeedbackId {
        &self.id
    }

    /// The authoring manager.
    pub fn manager_id(&self) -> &UserId {
        &self.manager_id
    }

    /// The subject employee.
    pub fn employee_id(&self) -> &UserId {
        &self.employee_id
    }

    /// Strengths commentary.
    pub fn strengths(&self) -> &Commentary {
        &self.strengths
    }

    /// Improvements commentary.
    pub fn improvements(&self) -> &Commentary {
        &self.improvements
    }

    /// Sentiment tag.
    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    /// Whether the subject employee has acknowledged the record.
    pub fn acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// When the record was first acknowledged, if ever.
    pub fn acknowledged_at(&self) -> Option<DateTime<Utc>> {
        self.acknowledged_at
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last-update timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a partial edit, refreshing the update timestamp.
    ///
    /// Editing is permitted after acknowledgment and does not revert it.
    pub fn apply(&mut self, patch: FeedbackPatch, now: DateTime<Utc>) {
        let FeedbackPatch {
            strengths,
            improvements,
            sentiment,
        } = patch;
        if let Some(strengths) = strengths {
            self.strengths = strengths;
        }
        if let Some(improvements) = improvements {
            self.improvements = improvements;
        }
        if let Some(sentiment) = sentiment {
            self.sentiment = sentiment;
        }
        self.updated_at = now;
    }

    /// Mark the record as acknowledged by its subject.
    ///
    /// Returns `true` when this call performed the transition and `false`
    /// when the record was already acknowledged; the repeat call changes
    /// nothing, keeping the transition idempotent.
    pub fn acknowledge(&mut self, now: DateTime<Utc>) -> bool {
        if self.acknowledged {
            return false;
        }
        self.acknowledged = true;
        self.acknowledged_at = Some(now);
        true
    }
}
