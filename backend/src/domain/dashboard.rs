//! Dashboard aggregation over an already-scoped feedback set.
//!
//! The fold here is pure and order-independent; access scoping happens
//! before these functions ever see a record.

use std::collections::BTreeMap;

use super::feedback::{Feedback, Sentiment};

/// Summary statistics for a set of feedback records.
///
/// ## Invariants
/// - `total == acknowledged_count + pending_count`, always; `pending_count`
///   is derived, never counted independently.
/// - `sentiment_counts` is sparse: sentiments with zero occurrences are
///   absent, so no entry ever holds a zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackSummary {
    /// Number of records in the scoped set.
    pub total: u64,
    /// Records the subject has acknowledged.
    pub acknowledged_count: u64,
    /// Records still awaiting acknowledgment.
    pub pending_count: u64,
    /// Occurrence count per sentiment actually present in the set.
    pub sentiment_counts: BTreeMap<Sentiment, u64>,
}

impl FeedbackSummary {
    /// Fold a scoped feedback set into its summary.
    pub fn from_feedback<'a>(records: impl IntoIterator<Item = &'a Feedback>) -> Self {
        let mut total = 0u64;
        let mut acknowledged_count = 0u64;
        let mut sentiment_counts = BTreeMap::new();

        for record in records {
            total += 1;
            if record.acknowledged() {
                acknowledged_count += 1;
            }
            *sentiment_counts.entry(record.sentiment()).or_insert(0) += 1;
        }

        Self {
            total,
            acknowledged_count,
            pending_count: total - acknowledged_count,
            sentiment_counts,
        }
    }
}

/// Manager dashboard: team headcount plus the summary of feedback given.
///
/// Team size is independent of feedback counts; a manager with three
/// reports and nothing written still sees a team of three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerDashboard {
    /// Direct-report headcount.
    pub total_team_members: u64,
    /// Summary over feedback the manager authored.
    pub summary: FeedbackSummary,
}
