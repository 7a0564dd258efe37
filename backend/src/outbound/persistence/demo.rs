//! Demo directory provisioning.
//!
//! Users are provisioned outside the in-scope API; this adapter stands in
//! for that external process on demo deployments. It is only invoked when
//! the bootstrap asks for it, never implicitly.

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    Clock, FeedbackRepository, FeedbackStoreError, UserRepository, UserStoreError,
};
use crate::domain::{
    Commentary, EmailAddress, Feedback, FeedbackId, FeedbackValidationError, PersonName, Role,
    Sentiment, User, UserId, UserValidationError,
};
use crate::outbound::credentials::Sha256CredentialVerifier;

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "demo123";

/// Errors raised while provisioning the demo directory.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A seed literal failed domain validation.
    #[error("invalid seed data: {0}")]
    Validation(#[from] UserValidationError),
    /// A seed commentary failed domain validation.
    #[error("invalid seed data: {0}")]
    FeedbackValidation(#[from] FeedbackValidationError),
    /// The identity store rejected a user.
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    /// The feedback store rejected a record.
    #[error(transparent)]
    FeedbackStore(#[from] FeedbackStoreError),
}

async fn provision_user<U: UserRepository>(
    users: &U,
    name: &str,
    email: &str,
    role: Role,
    manager_id: Option<UserId>,
    clock: &dyn Clock,
) -> Result<User, SeedError> {
    let user = User::new(
        UserId::random(),
        PersonName::new(name)?,
        EmailAddress::new(email)?,
        Sha256CredentialVerifier::digest(DEMO_PASSWORD),
        role,
        manager_id,
        clock.now(),
    );
    users.insert(&user).await?;
    Ok(user)
}

/// Seed two managers, their teams, and a couple of sample records.
///
/// # Errors
///
/// Fails when a store rejects a write; partially seeded data is left in
/// place since demo stores are rebuilt on every start.
pub async fn seed_demo_directory<U, F, C>(
    users: &U,
    feedback: &F,
    clock: &C,
) -> Result<(), SeedError>
where
    U: UserRepository,
    F: FeedbackRepository,
    C: Clock,
{
    let sarah = provision_user(
        users,
        "Sarah Johnson",
        "sarah@company.com",
        Role::Manager,
        None,
        clock,
    )
    .await?;
    let alex = provision_user(
        users,
        "Alex Chen",
        "alex@company.com",
        Role::Employee,
        Some(*sarah.id()),
        clock,
    )
    .await?;
    for (name, email) in [
        ("Jordan Smith", "jordan@company.com"),
        ("Maya Patel", "maya@company.com"),
    ] {
        provision_user(users, name, email, Role::Employee, Some(*sarah.id()), clock).await?;
    }

    let david = provision_user(
        users,
        "David Wilson",
        "david@company.com",
        Role::Manager,
        None,
        clock,
    )
    .await?;
    let emma = provision_user(
        users,
        "Emma Davis",
        "emma@company.com",
        Role::Employee,
        Some(*david.id()),
        clock,
    )
    .await?;

    let samples = [
        (
            &sarah,
            &alex,
            "Great collaboration on the quarterly launch",
            "Could delegate more of the release checklist",
            Sentiment::Positive,
        ),
        (
            &david,
            &emma,
            "Reliable incident follow-up",
            "Share context earlier when priorities shift",
            Sentiment::Neutral,
        ),
    ];
    for (manager, employee, strengths, improvements, sentiment) in samples {
        let record = Feedback::create(
            FeedbackId::random(),
            *manager.id(),
            *employee.id(),
            Commentary::new(strengths)?,
            Commentary::new(improvements)?,
            sentiment,
            clock.now(),
        );
        feedback.insert(&record).await?;
    }

    info!("demo directory seeded");
    Ok(())
}
