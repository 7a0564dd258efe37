//! Dashboard API handlers.
//!
//! ```text
//! GET /api/v1/dashboard/manager
//! GET /api/v1/dashboard/employee
//! ```

use std::collections::BTreeMap;

use actix_web::{get, web};
use serde::Serialize;

use crate::domain::{Error, FeedbackSummary, ManagerDashboard, Sentiment};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Manager dashboard payload.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagerDashboardResponse {
    /// Direct-report headcount, independent of feedback counts.
    pub total_team_members: u64,
    /// Number of records the manager has authored.
    pub total_feedbacks: u64,
    /// Authored records the subjects have acknowledged.
    pub acknowledged_count: u64,
    /// Authored records still pending acknowledgment.
    pub pending_count: u64,
    /// Sparse sentiment histogram; zero-count sentiments are absent.
    pub sentiment_counts: BTreeMap<Sentiment, u64>,
}

impl From<ManagerDashboard> for ManagerDashboardResponse {
    fn from(dashboard: ManagerDashboard) -> Self {
        let ManagerDashboard {
            total_team_members,
            summary,
        } = dashboard;
        Self {
            total_team_members,
            total_feedbacks: summary.total,
            acknowledged_count: summary.acknowledged_count,
            pending_count: summary.pending_count,
            sentiment_counts: summary.sentiment_counts,
        }
    }
}

/// Employee dashboard payload.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDashboardResponse {
    /// Number of records addressed to the employee.
    pub total_feedbacks: u64,
    /// Records the employee has acknowledged.
    pub acknowledged_count: u64,
    /// Records still pending acknowledgment.
    pub pending_count: u64,
    /// Sparse sentiment histogram; zero-count sentiments are absent.
    pub sentiment_counts: BTreeMap<Sentiment, u64>,
}

impl From<FeedbackSummary> for EmployeeDashboardResponse {
    fn from(summary: FeedbackSummary) -> Self {
        Self {
            total_feedbacks: summary.total,
            acknowledged_count: summary.acknowledged_count,
            pending_count: summary.pending_count,
            sentiment_counts: summary.sentiment_counts,
        }
    }
}

/// Manager dashboard aggregate.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/manager",
    responses(
        (status = 200, description = "Manager dashboard", body = ManagerDashboardResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "managerDashboard"
)]
#[get("/dashboard/manager")]
pub async fn manager_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ManagerDashboardResponse>> {
    let actor = session.require_user_id()?;
    let dashboard = state.dashboard.manager_dashboard(&actor).await?;
    Ok(web::Json(ManagerDashboardResponse::from(dashboard)))
}

/// Employee dashboard aggregate.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/employee",
    responses(
        (status = 200, description = "Employee dashboard", body = EmployeeDashboardResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "employeeDashboard"
)]
#[get("/dashboard/employee")]
pub async fn employee_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<EmployeeDashboardResponse>> {
    let actor = session.require_user_id()?;
    let summary = state.dashboard.employee_dashboard(&actor).await?;
    Ok(web::Json(EmployeeDashboardResponse::from(summary)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::feedback::CreateFeedbackRequest;
    use crate::inbound::http::test_utils::{seeded_state, test_session_middleware, TEST_PASSWORD};
    use crate::inbound::http::users::LoginRequest;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use serde_json::Value;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(crate::inbound::http::users::login)
                    .service(crate::inbound::http::feedback::create_feedback)
                    .service(crate::inbound::http::feedback::acknowledge_feedback)
                    .service(manager_dashboard)
                    .service(employee_dashboard),
            )
    }

    async fn login_and_get_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        email: &str,
    ) -> actix_web::cookie::Cookie<'static> {
        let login_req = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(LoginRequest {
                email: email.into(),
                password: TEST_PASSWORD.into(),
            })
            .to_request();
        let login_res = actix_test::call_service(app, login_req).await;
        assert!(login_res.status().is_success());
        login_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    async fn get_json(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        cookie: &actix_web::cookie::Cookie<'static>,
        uri: &str,
    ) -> Value {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::get()
                .uri(uri)
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        actix_test::read_body_json(response).await
    }

    #[actix_web::test]
    async fn manager_dashboard_tracks_the_acknowledgment_flow() {
        let seeded = seeded_state().await;
        let employee_id = seeded.reports[0].id().to_string();
        let app = actix_test::init_service(test_app(seeded.state)).await;
        let manager_cookie = login_and_get_cookie(&app, "sarah@company.com").await;

        // Three reports, nothing written yet.
        let empty = get_json(&app, &manager_cookie, "/api/v1/dashboard/manager").await;
        assert_eq!(
            empty.get("totalTeamMembers").and_then(Value::as_u64),
            Some(3)
        );
        assert_eq!(empty.get("totalFeedbacks").and_then(Value::as_u64), Some(0));
        assert_eq!(
            empty
                .get("sentimentCounts")
                .and_then(Value::as_object)
                .map(serde_json::Map::len),
            Some(0)
        );

        // One positive record for Alex.
        let create = actix_test::TestRequest::post()
            .uri("/api/v1/feedback")
            .cookie(manager_cookie.clone())
            .set_json(CreateFeedbackRequest {
                employee_id,
                strengths: "Great collaboration".into(),
                improvements: "Delegate more".into(),
                sentiment: "positive".into(),
            })
            .to_request();
        let created = actix_test::call_service(&app, create).await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(created).await;
        let id = created.get("id").and_then(Value::as_str).expect("id");

        let pending = get_json(&app, &manager_cookie, "/api/v1/dashboard/manager").await;
        assert_eq!(
            pending.get("totalTeamMembers").and_then(Value::as_u64),
            Some(3)
        );
        assert_eq!(
            pending.get("totalFeedbacks").and_then(Value::as_u64),
            Some(1)
        );
        assert_eq!(pending.get("pendingCount").and_then(Value::as_u64), Some(1));
        assert_eq!(
            pending
                .get("sentimentCounts")
                .and_then(|counts| counts.get("positive"))
                .and_then(Value::as_u64),
            Some(1)
        );

        // Alex acknowledges; the manager view reconciles.
        let alex_cookie = login_and_get_cookie(&app, "alex@company.com").await;
        let ack = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/feedback/{id}/acknowledge"))
                .cookie(alex_cookie)
                .to_request(),
        )
        .await;
        assert_eq!(ack.status(), StatusCode::OK);

        let settled = get_json(&app, &manager_cookie, "/api/v1/dashboard/manager").await;
        assert_eq!(
            settled.get("acknowledgedCount").and_then(Value::as_u64),
            Some(1)
        );
        assert_eq!(settled.get("pendingCount").and_then(Value::as_u64), Some(0));
    }

    #[actix_web::test]
    async fn manager_dashboard_is_forbidden_for_employees() {
        let seeded = seeded_state().await;
        let app = actix_test::init_service(test_app(seeded.state)).await;
        let cookie = login_and_get_cookie(&app, "alex@company.com").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboard/manager")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn employee_dashboard_folds_the_received_set() {
        let seeded = seeded_state().await;
        let employee_id = seeded.reports[0].id().to_string();
        let app = actix_test::init_service(test_app(seeded.state)).await;
        let manager_cookie = login_and_get_cookie(&app, "sarah@company.com").await;

        let create = actix_test::TestRequest::post()
            .uri("/api/v1/feedback")
            .cookie(manager_cookie)
            .set_json(CreateFeedbackRequest {
                employee_id,
                strengths: "Great collaboration".into(),
                improvements: "Delegate more".into(),
                sentiment: "negative".into(),
            })
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, create).await.status(),
            StatusCode::CREATED
        );

        let alex_cookie = login_and_get_cookie(&app, "alex@company.com").await;
        let summary = get_json(&app, &alex_cookie, "/api/v1/dashboard/employee").await;
        assert_eq!(
            summary.get("totalFeedbacks").and_then(Value::as_u64),
            Some(1)
        );
        assert_eq!(summary.get("pendingCount").and_then(Value::as_u64), Some(1));
        assert_eq!(
            summary
                .get("sentimentCounts")
                .and_then(|counts| counts.get("negative"))
                .and_then(Value::as_u64),
            Some(1)
        );
        assert!(summary
            .get("sentimentCounts")
            .and_then(|counts| counts.get("positive"))
            .is_none());

        // An uninvolved teammate still sees an empty, reconciled summary.
        let maya_cookie = login_and_get_cookie(&app, "maya@company.com").await;
        let empty = get_json(&app, &maya_cookie, "/api/v1/dashboard/employee").await;
        assert_eq!(empty.get("totalFeedbacks").and_then(Value::as_u64), Some(0));
        assert_eq!(empty.get("pendingCount").and_then(Value::as_u64), Some(0));
    }
}
