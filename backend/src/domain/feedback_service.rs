//! Feedback lifecycle services.
//!
//! Implements the [`FeedbackCommand`] and [`FeedbackQuery`] driving ports:
//! atomic creation for direct reports, partial edits by the authoring
//! manager, the one-way acknowledgment transition, and the role-scoped
//! listings. Access decisions are delegated to [`crate::domain::access`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::access::{
    can_acknowledge_feedback, can_author_feedback_for, can_edit_feedback, require_manager,
    FeedbackDirection,
};
use crate::domain::ports::{
    AttributedFeedback, Clock, CreateFeedback, FeedbackCommand, FeedbackQuery, FeedbackRepository,
    FeedbackStoreError, UserRepository, UserStoreError, UNKNOWN_USER_NAME,
};
use crate::domain::{Error, Feedback, FeedbackId, FeedbackPatch, User, UserId};

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

/// Out-of-scope ids read as absent, deliberately; see the access policy.
fn feedback_not_found() -> Error {
    Error::not_found("feedback not found")
}

/// Feedback lifecycle service over the identity and feedback stores.
#[derive(Clone)]
pub struct FeedbackService<U, F, C> {
    users: Arc<U>,
    feedback: Arc<F>,
    clock: Arc<C>,
}

impl<U, F, C> FeedbackService<U, F, C> {
    /// Create a new service from the stores and the clock.
    pub fn new(users: Arc<U>, feedback: Arc<F>, clock: Arc<C>) -> Self {
        Self {
            users,
            feedback,
            clock,
        }
    }
}

impl<U, F, C> FeedbackService<U, F, C>
where
    U: UserRepository,
    F: FeedbackRepository,
    C: Clock,
{
    async fn require_actor(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    async fn display_name(&self, id: &UserId) -> Result<String, Error> {
        let user = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_user_store_error)?;
        Ok(user.map_or_else(
            || UNKNOWN_USER_NAME.to_owned(),
            |user| user.name().as_ref().to_owned(),
        ))
    }

    /// Join a record with both display names, resolving the side the
    /// caller does not already hold.
    async fn attribute(
        &self,
        feedback: Feedback,
        known: &User,
    ) -> Result<AttributedFeedback, Error> {
        let (manager_name, employee_name) = if known.id() == feedback.manager_id() {
            let employee_name = self.display_name(feedback.employee_id()).await?;
            (known.name().as_ref().to_owned(), employee_name)
        } else {
            let manager_name = self.display_name(feedback.manager_id()).await?;
            (manager_name, known.name().as_ref().to_owned())
        };

        Ok(AttributedFeedback {
            feedback,
            manager_name,
            employee_name,
        })
    }

    async fn attribute_all(
        &self,
        records: Vec<Feedback>,
        known: &User,
    ) -> Result<Vec<AttributedFeedback>, Error> {
        let mut attributed = Vec::with_capacity(records.len());
        for record in records {
            attributed.push(self.attribute(record, known).await?);
        }
        Ok(attributed)
    }
}

#[async_trait]
impl<U, F, C> FeedbackCommand for FeedbackService<U, F, C>
where
    U: UserRepository,
    F: FeedbackRepository,
    C: Clock,
{
    async fn create(
        &self,
        actor: &UserId,
        request: CreateFeedback,
    ) -> Result<AttributedFeedback, Error> {
        let manager = self.require_actor(actor).await?;
        require_manager(&manager)?;

        let employee = self
            .users
            .find_by_id(&request.employee_id)
            .await
            .map_err(map_user_store_error)?
            .filter(|employee| can_author_feedback_for(&manager, employee))
            .ok_or_else(|| Error::not_found("employee not found in your team"))?;

        let record = Feedback::create(
            FeedbackId::random(),
            *manager.id(),
            *employee.id(),
            request.strengths,
            request.improvements,
            request.sentiment,
            self.clock.now(),
        );

        self.feedback
            .insert(&record)
            .await
            .map_err(map_feedback_store_error)?;

        info!(
            feedback_id = %record.id(),
            employee_id = %employee.id(),
            sentiment = %record.sentiment(),
            "feedback created"
        );

        Ok(AttributedFeedback {
            manager_name: manager.name().as_ref().to_owned(),
            employee_name: employee.name().as_ref().to_owned(),
            feedback: record,
        })
    }

    async fn update(
        &self,
        actor: &UserId,
        id: &FeedbackId,
        patch: FeedbackPatch,
    ) -> Result<AttributedFeedback, Error> {
        let manager = self.require_actor(actor).await?;
        require_manager(&manager)?;

        let mut record = self
            .feedback
            .find_by_id(id)
            .await
            .map_err(map_feedback_store_error)?
            .filter(|record| can_edit_feedback(manager.id(), record))
            .ok_or_else(feedback_not_found)?;

        record.apply(patch, self.clock.now());

        self.feedback
            .update(&record)
            .await
            .map_err(map_feedback_store_error)?;

        self.attribute(record, &manager).await
    }

    async fn acknowledge(
        &self,
        actor: &UserId,
        id: &FeedbackId,
    ) -> Result<AttributedFeedback, Error> {
        let employee = self.require_actor(actor).await?;

        let mut record = self
            .feedback
            .find_by_id(id)
            .await
            .map_err(map_feedback_store_error)?
            .filter(|record| can_acknowledge_feedback(employee.id(), record))
            .ok_or_else(feedback_not_found)?;

        // Repeat acknowledgments are a successful no-op; skip the write.
        if record.acknowledge(self.clock.now()) {
            self.feedback
                .update(&record)
                .await
                .map_err(map_feedback_store_error)?;
            info!(feedback_id = %record.id(), "feedback acknowledged");
        }

        self.attribute(record, &employee).await
    }
}

#[async_trait]
impl<U, F, C> FeedbackQuery for FeedbackService<U, F, C>
where
    U: UserRepository,
    F: FeedbackRepository,
    C: Clock,
{
    async fn list_given(&self, actor: &UserId) -> Result<Vec<AttributedFeedback>, Error> {
        let manager = self.require_actor(actor).await?;
        require_manager(&manager)?;

        let records = self
            .feedback
            .list_scoped(FeedbackDirection::Given, manager.id())
            .await
            .map_err(map_feedback_store_error)?;

        self.attribute_all(records, &manager).await
    }

    async fn list_received(&self, actor: &UserId) -> Result<Vec<AttributedFeedback>, Error> {
        let employee = self.require_actor(actor).await?;

        let records = self
            .feedback
            .list_scoped(FeedbackDirection::Received, employee.id())
            .await
            .map_err(map_feedback_store_error)?;

        self.attribute_all(records, &employee).await
    }
}

#[cfg(test)]
#[path = "feedback_service_tests.rs"]
mod tests;
