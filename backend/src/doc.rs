//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every HTTP endpoint from the inbound layer, the response
//! schemas, and the session cookie security scheme.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Role, Sentiment};
use crate::inbound::http::dashboard::{EmployeeDashboardResponse, ManagerDashboardResponse};
use crate::inbound::http::feedback::{
    CreateFeedbackRequest, FeedbackResponse, UpdateFeedbackRequest,
};
use crate::inbound::http::users::{LoginRequest, UserResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Feedback tracker API",
        description = "HTTP interface for session-authenticated feedback, team, and dashboard access."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::list_team,
        crate::inbound::http::feedback::create_feedback,
        crate::inbound::http::feedback::list_feedback_given,
        crate::inbound::http::feedback::list_feedback_received,
        crate::inbound::http::feedback::update_feedback,
        crate::inbound::http::feedback::acknowledge_feedback,
        crate::inbound::http::dashboard::manager_dashboard,
        crate::inbound::http::dashboard::employee_dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        Sentiment,
        LoginRequest,
        UserResponse,
        CreateFeedbackRequest,
        UpdateFeedbackRequest,
        FeedbackResponse,
        ManagerDashboardResponse,
        EmployeeDashboardResponse,
    )),
    tags(
        (name = "auth", description = "Authentication and current identity"),
        (name = "team", description = "Manager team listings"),
        (name = "feedback", description = "Feedback lifecycle operations"),
        (name = "dashboard", description = "Aggregate statistics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
