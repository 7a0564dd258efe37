//! Backend entry-point: wires the HTTP surface over in-memory stores.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::{web, App, HttpServer};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::{AuthService, DashboardService, FeedbackService, TeamService};
use backend::inbound::http::dashboard::{employee_dashboard, manager_dashboard};
use backend::inbound::http::feedback::{
    acknowledge_feedback, create_feedback, list_feedback_given, list_feedback_received,
    update_feedback,
};
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::users::{current_user, list_team, login};
use backend::outbound::clock::SystemClock;
use backend::outbound::credentials::Sha256CredentialVerifier;
use backend::outbound::persistence::{
    seed_demo_directory, InMemoryFeedbackRepository, InMemoryUserRepository,
};

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

async fn build_state() -> std::io::Result<HttpState> {
    let users = Arc::new(InMemoryUserRepository::new());
    let feedback = Arc::new(InMemoryFeedbackRepository::new());
    let clock = Arc::new(SystemClock);
    let verifier = Arc::new(Sha256CredentialVerifier);

    if env::var("DEMO_DATA").ok().as_deref() == Some("1") {
        seed_demo_directory(users.as_ref(), feedback.as_ref(), clock.as_ref())
            .await
            .map_err(|e| std::io::Error::other(format!("demo seeding failed: {e}")))?;
    }

    let auth = Arc::new(AuthService::new(users.clone(), verifier));
    let team = Arc::new(TeamService::new(users.clone()));
    let feedback_service = Arc::new(FeedbackService::new(
        users.clone(),
        feedback.clone(),
        clock,
    ));
    let dashboard = Arc::new(DashboardService::new(users, feedback));

    Ok(HttpState::new(HttpStatePorts {
        login: auth.clone(),
        profile: auth,
        team,
        feedback: feedback_service.clone(),
        feedback_query: feedback_service,
        dashboard,
    }))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let state = build_state().await?;

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .wrap(session)
            .service(
                web::scope("/api/v1")
                    .service(login)
                    .service(current_user)
                    .service(list_team)
                    .service(create_feedback)
                    .service(list_feedback_given)
                    .service(list_feedback_received)
                    .service(update_feedback)
                    .service(acknowledge_feedback)
                    .service(manager_dashboard)
                    .service(employee_dashboard),
            )
            .service(ready)
            .service(live)
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
