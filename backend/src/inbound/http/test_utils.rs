//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;

use crate::domain::{
    AuthService, DashboardService, EmailAddress, FeedbackService, PersonName, Role, TeamService,
    User, UserId,
};
use crate::domain::ports::{Clock, UserRepository};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::clock::SystemClock;
use crate::outbound::credentials::Sha256CredentialVerifier;
use crate::outbound::persistence::{InMemoryFeedbackRepository, InMemoryUserRepository};

/// Password accepted for every user seeded by [`seeded_state`].
pub const TEST_PASSWORD: &str = "demo123";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// A small two-team directory with its wired HTTP state.
pub struct SeededDirectory {
    pub state: HttpState,
    pub manager: User,
    pub reports: Vec<User>,
    pub other_manager: User,
    pub other_report: User,
}

async fn provision(
    users: &InMemoryUserRepository,
    name: &str,
    email: &str,
    role: Role,
    manager_id: Option<UserId>,
) -> User {
    let user = User::new(
        UserId::random(),
        PersonName::new(name).expect("seed name"),
        EmailAddress::new(email).expect("seed email"),
        Sha256CredentialVerifier::digest(TEST_PASSWORD),
        role,
        manager_id,
        SystemClock.now(),
    );
    users.insert(&user).await.expect("seed user");
    user
}

/// Seed the fixture directory and wire real services over in-memory stores.
pub async fn seeded_state() -> SeededDirectory {
    let users = Arc::new(InMemoryUserRepository::new());
    let feedback = Arc::new(InMemoryFeedbackRepository::new());
    let clock = Arc::new(SystemClock);
    let verifier = Arc::new(Sha256CredentialVerifier);

    let manager = provision(
        &users,
        "Sarah Johnson",
        "sarah@company.com",
        Role::Manager,
        None,
    )
    .await;
    let mut reports = Vec::new();
    for (name, email) in [
        ("Alex Chen", "alex@company.com"),
        ("Jordan Smith", "jordan@company.com"),
        ("Maya Patel", "maya@company.com"),
    ] {
        reports.push(provision(&users, name, email, Role::Employee, Some(*manager.id())).await);
    }
    let other_manager = provision(
        &users,
        "David Wilson",
        "david@company.com",
        Role::Manager,
        None,
    )
    .await;
    let other_report = provision(
        &users,
        "Emma Davis",
        "emma@company.com",
        Role::Employee,
        Some(*other_manager.id()),
    )
    .await;

    let auth = Arc::new(AuthService::new(users.clone(), verifier));
    let team = Arc::new(TeamService::new(users.clone()));
    let feedback_service = Arc::new(FeedbackService::new(
        users.clone(),
        feedback.clone(),
        clock.clone(),
    ));
    let dashboard = Arc::new(DashboardService::new(users, feedback));

    let state = HttpState::new(HttpStatePorts {
        login: auth.clone(),
        profile: auth,
        team,
        feedback: feedback_service.clone(),
        feedback_query: feedback_service,
        dashboard,
    });

    SeededDirectory {
        state,
        manager,
        reports,
        other_manager,
        other_report,
    }
}
