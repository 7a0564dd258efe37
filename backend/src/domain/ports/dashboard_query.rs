//! Driving port for dashboard aggregates.

use async_trait::async_trait;

use crate::domain::{Error, FeedbackSummary, ManagerDashboard, UserId};

/// Domain use-case port for dashboard statistics.
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Team headcount plus a summary of feedback the actor authored.
    /// Manager-only.
    async fn manager_dashboard(&self, actor: &UserId) -> Result<ManagerDashboard, Error>;

    /// Summary of feedback addressed to the actor. Any authenticated
    /// identity.
    async fn employee_dashboard(&self, actor: &UserId) -> Result<FeedbackSummary, Error>;
}
