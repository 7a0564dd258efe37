//! In-memory persistence adapters.
//!
//! These back the repository ports with `Mutex<HashMap>` tables. Each table
//! takes its lock for the whole call, so single-record read-modify-write is
//! atomic per operation and concurrent writers to the same id resolve
//! last-writer-wins, which is all the lifecycle requires.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::access::FeedbackDirection;
use crate::domain::ports::{
    FeedbackRepository, FeedbackStoreError, UserRepository, UserStoreError,
};
use crate::domain::{EmailAddress, Feedback, FeedbackId, User, UserId};

fn lock_users<'a>(
    table: &'a Mutex<HashMap<UserId, User>>,
) -> Result<MutexGuard<'a, HashMap<UserId, User>>, UserStoreError> {
    table
        .lock()
        .map_err(|_| UserStoreError::query("user table mutex poisoned"))
}

fn lock_feedback<'a>(
    table: &'a Mutex<HashMap<FeedbackId, Feedback>>,
) -> Result<MutexGuard<'a, HashMap<FeedbackId, Feedback>>, FeedbackStoreError> {
    table
        .lock()
        .map_err(|_| FeedbackStoreError::query("feedback table mutex poisoned"))
}

/// In-memory identity store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut table = lock_users(&self.users)?;
        if table
            .values()
            .any(|existing| existing.email() == user.email() && existing.id() != user.id())
        {
            return Err(UserStoreError::duplicate_email(user.email().as_ref()));
        }
        table.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        let table = lock_users(&self.users)?;
        Ok(table.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError> {
        let table = lock_users(&self.users)?;
        Ok(table.values().find(|user| user.email() == email).cloned())
    }

    async fn list_reports(&self, manager_id: &UserId) -> Result<Vec<User>, UserStoreError> {
        let table = lock_users(&self.users)?;
        let mut reports: Vec<User> = table
            .values()
            .filter(|user| user.manager_id() == Some(manager_id))
            .cloned()
            .collect();
        reports.sort_by(|a, b| (a.created_at(), a.id()).cmp(&(b.created_at(), b.id())));
        Ok(reports)
    }
}

/// In-memory feedback store.
#[derive(Debug, Default)]
pub struct InMemoryFeedbackRepository {
    records: Mutex<HashMap<FeedbackId, Feedback>>,
}

impl InMemoryFeedbackRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut records: Vec<Feedback>) -> Vec<Feedback> {
    records.sort_by(|a, b| (a.created_at(), *a.id()).cmp(&(b.created_at(), *b.id())));
    records
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn insert(&self, feedback: &Feedback) -> Result<(), FeedbackStoreError> {
        let mut table = lock_feedback(&self.records)?;
        if table.contains_key(feedback.id()) {
            return Err(FeedbackStoreError::query(format!(
                "feedback {} already exists",
                feedback.id()
            )));
        }
        table.insert(*feedback.id(), feedback.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &FeedbackId) -> Result<Option<Feedback>, FeedbackStoreError> {
        let table = lock_feedback(&self.records)?;
        Ok(table.get(id).cloned())
    }

    async fn list_scoped(
        &self,
        direction: FeedbackDirection,
        actor: &UserId,
    ) -> Result<Vec<Feedback>, FeedbackStoreError> {
        let table = lock_feedback(&self.records)?;
        Ok(sorted(
            table
                .values()
                .filter(|record| direction.matches(actor, record))
                .cloned()
                .collect(),
        ))
    }

    async fn update(&self, feedback: &Feedback) -> Result<(), FeedbackStoreError> {
        let mut table = lock_feedback(&self.records)?;
        match table.get_mut(feedback.id()) {
            Some(slot) => {
                *slot = feedback.clone();
                Ok(())
            }
            None => Err(FeedbackStoreError::unknown_id(feedback.id().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Commentary, PasswordHash, PersonName, Role, Sentiment};
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    fn user(email: &str, manager_id: Option<UserId>, created: DateTime<Utc>) -> User {
        User::new(
            UserId::random(),
            PersonName::new("Sample User").expect("name"),
            EmailAddress::new(email).expect("email"),
            PasswordHash::new("digest").expect("hash"),
            Role::Employee,
            manager_id,
            created,
        )
    }

    fn record(manager: &UserId, employee: &UserId, created: DateTime<Utc>) -> Feedback {
        Feedback::create(
            FeedbackId::random(),
            *manager,
            *employee,
            Commentary::new("strengths").expect("strengths"),
            Commentary::new("improvements").expect("improvements"),
            Sentiment::Positive,
            created,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn users_round_trip_by_id_and_email() {
        let repo = InMemoryUserRepository::new();
        let stored = user("alex@company.com", None, at(0));
        repo.insert(&stored).await.expect("insert");

        let by_id = repo.find_by_id(stored.id()).await.expect("lookup");
        assert_eq!(by_id.as_ref(), Some(&stored));

        let email = EmailAddress::new("alex@company.com").expect("email");
        let by_email = repo.find_by_email(&email).await.expect("lookup");
        assert_eq!(by_email, Some(stored));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_emails_are_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("alex@company.com", None, at(0)))
            .await
            .expect("first insert");

        let err = repo
            .insert(&user("alex@company.com", None, at(1)))
            .await
            .expect_err("second insert fails");
        assert_eq!(
            err,
            UserStoreError::duplicate_email("alex@company.com")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn reports_are_scoped_to_the_manager_and_ordered() {
        let repo = InMemoryUserRepository::new();
        let manager_id = UserId::random();
        let second = user("b@company.com", Some(manager_id), at(2));
        let first = user("a@company.com", Some(manager_id), at(1));
        let foreign = user("c@company.com", Some(UserId::random()), at(0));
        for stored in [&second, &first, &foreign] {
            repo.insert(stored).await.expect("insert");
        }

        let reports = repo.list_reports(&manager_id).await.expect("listing");
        assert_eq!(reports, vec![first, second]);
    }

    #[rstest]
    #[tokio::test]
    async fn feedback_updates_replace_the_stored_record() {
        let repo = InMemoryFeedbackRepository::new();
        let mut stored = record(&UserId::random(), &UserId::random(), at(0));
        repo.insert(&stored).await.expect("insert");

        assert!(stored.acknowledge(at(5)));
        repo.update(&stored).await.expect("update");

        let loaded = repo
            .find_by_id(stored.id())
            .await
            .expect("lookup")
            .expect("present");
        assert!(loaded.acknowledged());
        assert_eq!(loaded.acknowledged_at(), Some(at(5)));
    }

    #[rstest]
    #[tokio::test]
    async fn updating_an_unknown_record_fails() {
        let repo = InMemoryFeedbackRepository::new();
        let ghost = record(&UserId::random(), &UserId::random(), at(0));
        let err = repo.update(&ghost).await.expect_err("unknown id");
        assert_eq!(err, FeedbackStoreError::unknown_id(ghost.id().to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn double_insert_of_the_same_id_fails() {
        let repo = InMemoryFeedbackRepository::new();
        let stored = record(&UserId::random(), &UserId::random(), at(0));
        repo.insert(&stored).await.expect("insert");
        assert!(repo.insert(&stored).await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn listings_are_scoped_per_side() {
        let repo = InMemoryFeedbackRepository::new();
        let manager = UserId::random();
        let employee = UserId::random();
        let mine = record(&manager, &employee, at(1));
        let other = record(&UserId::random(), &UserId::random(), at(2));
        repo.insert(&mine).await.expect("insert");
        repo.insert(&other).await.expect("insert");

        let given = repo
            .list_scoped(FeedbackDirection::Given, &manager)
            .await
            .expect("given");
        assert_eq!(given, vec![mine.clone()]);
        let received = repo
            .list_scoped(FeedbackDirection::Received, &employee)
            .await
            .expect("received");
        assert_eq!(received, vec![mine]);
    }
}
