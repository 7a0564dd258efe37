//! Dashboard aggregation services.
//!
//! Implements the [`DashboardQuery`] driving port by scoping the feedback
//! set through the access policy and folding it with
//! [`FeedbackSummary::from_feedback`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::{require_manager, FeedbackDirection};
use crate::domain::ports::{
    DashboardQuery, FeedbackRepository, FeedbackStoreError, UserRepository, UserStoreError,
};
use crate::domain::{Error, FeedbackSummary, ManagerDashboard, User, UserId};

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

fn map_feedback_store_error(error: FeedbackStoreError) -> Error {
    match error {
        FeedbackStoreError::Connection { message } => {
            Error::service_unavailable(format!("feedback store unavailable: {message}"))
        }
        FeedbackStoreError::Query { message } => {
            Error::internal(format!("feedback store error: {message}"))
        }
        FeedbackStoreError::UnknownId { id } => {
            Error::internal(format!("feedback store lost record {id}"))
        }
    }
}

/// Dashboard service over the identity and feedback stores.
#[derive(Clone)]
pub struct DashboardService<U, F> {
    users: Arc<U>,
    feedback: Arc<F>,
}

impl<U, F> DashboardService<U, F> {
    /// Create a new service from the stores.
    pub fn new(users: Arc<U>, feedback: Arc<F>) -> Self {
        Self { users, feedback }
    }
}

impl<U, F> DashboardService<U, F>
where
    U: UserRepository,
    F: FeedbackRepository,
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
impl<U, F> DashboardQuery for DashboardService<U, F>
where
    U: UserRepository,
    F: FeedbackRepository,
{
    async fn manager_dashboard(&self, actor: &UserId) -> Result<ManagerDashboard, Error> {
        let manager = self.require_actor(actor).await?;
        require_manager(&manager)?;

        let team = self
            .users
            .list_reports(manager.id())
            .await
            .map_err(map_user_store_error)?;

        let given = self
            .feedback
            .list_scoped(FeedbackDirection::Given, manager.id())
            .await
            .map_err(map_feedback_store_error)?;

        Ok(ManagerDashboard {
            total_team_members: team.len() as u64,
            summary: FeedbackSummary::from_feedback(&given),
        })
    }

    async fn employee_dashboard(&self, actor: &UserId) -> Result<FeedbackSummary, Error> {
        let employee = self.require_actor(actor).await?;

        let received = self
            .feedback
            .list_scoped(FeedbackDirection::Received, employee.id())
            .await
            .map_err(map_feedback_store_error)?;

        Ok(FeedbackSummary::from_feedback(&received))
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
