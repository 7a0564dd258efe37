//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define the strongly typed entities and the access/aggregation
//! rules used by the API and persistence layers. Keep types immutable where
//! possible and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic failure payload.
//! - `User`, `Role`, `UserId` and friends — directory identities.
//! - `Feedback`, `Sentiment`, `FeedbackPatch` — the feedback aggregate.
//! - `access` — pure visibility and mutation decisions.
//! - `FeedbackSummary`, `ManagerDashboard` — aggregation results.
//! - `ports` — hexagonal boundary traits.
//! - Services implementing the driving ports over the driven ones.

pub mod access;
pub mod auth;
mod auth_service;
pub mod dashboard;
mod dashboard_service;
pub mod error;
pub mod feedback;
mod feedback_service;
pub mod ports;
mod team_service;
pub mod user;

pub use self::auth::{Identity, LoginCredentials, LoginValidationError};
pub use self::auth_service::AuthService;
pub use self::dashboard::{FeedbackSummary, ManagerDashboard};
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feedback::{
    Commentary, Feedback, FeedbackId, FeedbackPatch, FeedbackValidationError, Sentiment,
};
pub use self::feedback_service::FeedbackService;
pub use self::team_service::TeamService;
pub use self::user::{
    EmailAddress, PasswordHash, PersonName, Role, User, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
