//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports (use-cases) are what inbound adapters call; driven ports
//! (stores, clock, credential verification) are what domain services call
//! outward. Each driven port exposes strongly typed errors so adapters map
//! their failures into predictable variants.

mod clock;
mod credential_verifier;
mod dashboard_query;
mod feedback_command;
mod feedback_query;
mod feedback_repository;
mod login_service;
mod profile_query;
mod team_query;
mod user_repository;

#[cfg(test)]
pub use clock::MockClock;
pub use clock::Clock;
#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
pub use credential_verifier::CredentialVerifier;
pub use dashboard_query::DashboardQuery;
pub use feedback_command::{CreateFeedback, FeedbackCommand};
pub use feedback_query::{AttributedFeedback, FeedbackQuery, UNKNOWN_USER_NAME};
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
pub use feedback_repository::{FeedbackRepository, FeedbackStoreError};
pub use login_service::LoginService;
pub use profile_query::ProfileQuery;
pub use team_query::TeamQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserStoreError};
