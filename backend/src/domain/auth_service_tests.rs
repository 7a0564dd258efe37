//! Behaviour coverage for the authentication services.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockCredentialVerifier, MockUserRepository};
use crate::domain::{EmailAddress, ErrorCode, PasswordHash, PersonName, Role};

fn directory_user(role: Role) -> User {
    User::new(
        UserId::random(),
        PersonName::new("Sarah Johnson").expect("name"),
        EmailAddress::new("sarah@company.com").expect("email"),
        PasswordHash::new("digest").expect("hash"),
        role,
        None,
        Utc.timestamp_opt(0, 0).single().expect("timestamp"),
    )
}

fn credentials() -> LoginCredentials {
    LoginCredentials::try_from_parts("sarah@company.com", "demo123").expect("credentials")
}

#[rstest]
#[tokio::test]
async fn authenticate_returns_the_identity_on_a_match() {
    let user = directory_user(Role::Manager);
    let expected_id = *user.id();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .with(eq(user.email().clone()))
        .return_once(move |_| Ok(Some(user)));

    let mut verifier = MockCredentialVerifier::new();
    verifier.expect_verify().return_const(true);

    let service = AuthService::new(Arc::new(users), Arc::new(verifier));
    let identity = service
        .authenticate(&credentials())
        .await
        .expect("authentication succeeds");
    assert_eq!(identity.id, expected_id);
    assert_eq!(identity.role, Role::Manager);
}

#[rstest]
#[case(false, true)]
#[case(true, false)]
#[tokio::test]
async fn unknown_email_and_bad_password_are_indistinguishable(
    #[case] email_known: bool,
    #[case] password_ok: bool,
) {
    let mut users = MockUserRepository::new();
    if email_known {
        let user = directory_user(Role::Employee);
        users
            .expect_find_by_email()
            .return_once(move |_| Ok(Some(user)));
    } else {
        users.expect_find_by_email().return_once(|_| Ok(None));
    }

    let mut verifier = MockCredentialVerifier::new();
    verifier.expect_verify().return_const(password_ok);

    let service = AuthService::new(Arc::new(users), Arc::new(verifier));
    let err = service
        .authenticate(&credentials())
        .await
        .expect_err("authentication fails");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "incorrect email or password");
}

#[rstest]
#[tokio::test]
async fn store_outages_surface_as_service_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Err(UserStoreError::connection("refused")));

    let service = AuthService::new(Arc::new(users), Arc::new(MockCredentialVerifier::new()));
    let err = service
        .authenticate(&credentials())
        .await
        .expect_err("store outage fails");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn fetch_profile_round_trips_the_directory_record() {
    let user = directory_user(Role::Employee);
    let id = *user.id();
    let expected = user.clone();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(id))
        .return_once(move |_| Ok(Some(user)));

    let service = AuthService::new(Arc::new(users), Arc::new(MockCredentialVerifier::new()));
    let profile = service.fetch_profile(&id).await.expect("profile");
    assert_eq!(profile, expected);
}

#[rstest]
#[tokio::test]
async fn stale_session_ids_force_a_fresh_login() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let service = AuthService::new(Arc::new(users), Arc::new(MockCredentialVerifier::new()));
    let err = service
        .fetch_profile(&UserId::random())
        .await
        .expect_err("stale id fails");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}
