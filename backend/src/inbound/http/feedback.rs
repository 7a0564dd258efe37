//! Feedback API handlers.
//!
//! ```text
//! POST /api/v1/feedback
//! GET  /api/v1/feedback/given
//! GET  /api/v1/feedback/received
//! PUT  /api/v1/feedback/{id}
//! POST /api/v1/feedback/{id}/acknowledge
//! ```

use actix_web::{get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{AttributedFeedback, CreateFeedback};
use crate::domain::{
    Commentary, Error, FeedbackId, FeedbackPatch, FeedbackValidationError, Sentiment, UserId,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Create request body for `POST /api/v1/feedback`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    /// Subject employee id; must be on the acting manager's team.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub employee_id: String,
    /// Required strengths commentary.
    pub strengths: String,
    /// Required improvements commentary.
    pub improvements: String,
    /// One of `positive`, `neutral`, `negative`.
    #[schema(example = "positive")]
    pub sentiment: String,
}

/// Partial update body for `PUT /api/v1/feedback/{id}`.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackRequest {
    #[serde(default)]
    pub strengths: Option<String>,
    #[serde(default)]
    pub improvements: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
}

/// Feedback record as returned to clients, with both display names joined.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: String,
    pub manager_id: String,
    pub employee_id: String,
    pub strengths: String,
    pub improvements: String,
    pub sentiment: Sentiment,
    pub acknowledged: bool,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[schema(example = "Sarah Johnson")]
    pub manager_name: String,
    #[schema(example = "Alex Chen")]
    pub employee_name: String,
}

impl From<AttributedFeedback> for FeedbackResponse {
    fn from(attributed: AttributedFeedback) -> Self {
        let AttributedFeedback {
            feedback,
            manager_name,
            employee_name,
        } = attributed;
        Self {
            id: feedback.id().to_string(),
            manager_id: feedback.manager_id().to_string(),
            employee_id: feedback.employee_id().to_string(),
            strengths: feedback.strengths().as_ref().to_owned(),
            improvements: feedback.improvements().as_ref().to_owned(),
            sentiment: feedback.sentiment(),
            acknowledged: feedback.acknowledged(),
            acknowledged_at: feedback.acknowledged_at(),
            created_at: feedback.created_at(),
            updated_at: feedback.updated_at(),
            manager_name,
            employee_name,
        }
    }
}

fn invalid_field(field: &str, err: &FeedbackValidationError) -> Error {
    let code = match err {
        FeedbackValidationError::EmptyCommentary => "empty",
        FeedbackValidationError::CommentaryTooLong { .. } => "too_long",
        FeedbackValidationError::UnknownSentiment => "unknown_sentiment",
        FeedbackValidationError::EmptyId | FeedbackValidationError::InvalidId => "invalid_id",
    };
    Error::invalid_request(format!("{field} is invalid: {err}"))
        .with_details(json!({ "field": field, "code": code }))
}

fn parse_employee_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        Error::invalid_request(format!("employeeId is invalid: {err}"))
            .with_details(json!({ "field": "employeeId", "code": "invalid_id" }))
    })
}

fn parse_feedback_id(raw: &str) -> Result<FeedbackId, Error> {
    FeedbackId::new(raw).map_err(|err| invalid_field("id", &err))
}

impl TryFrom<CreateFeedbackRequest> for CreateFeedback {
    type Error = Error;

    fn try_from(value: CreateFeedbackRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            employee_id: parse_employee_id(&value.employee_id)?,
            strengths: Commentary::new(value.strengths)
                .map_err(|err| invalid_field("strengths", &err))?,
            improvements: Commentary::new(value.improvements)
                .map_err(|err| invalid_field("improvements", &err))?,
            sentiment: Sentiment::parse(&value.sentiment)
                .map_err(|err| invalid_field("sentiment", &err))?,
        })
    }
}

impl TryFrom<UpdateFeedbackRequest> for FeedbackPatch {
    type Error = Error;

    fn try_from(value: UpdateFeedbackRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            strengths: value
                .strengths
                .map(|raw| Commentary::new(raw).map_err(|err| invalid_field("strengths", &err)))
                .transpose()?,
            improvements: value
                .improvements
                .map(|raw| Commentary::new(raw).map_err(|err| invalid_field("improvements", &err)))
                .transpose()?,
            sentiment: value
                .sentiment
                .map(|raw| Sentiment::parse(&raw).map_err(|err| invalid_field("sentiment", &err)))
                .transpose()?,
        })
    }
}

/// Create feedback for a direct report.
#[utoipa::path(
    post,
    path = "/api/v1/feedback",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback created", body = FeedbackResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Employee not on the team", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "createFeedback"
)]
#[post("/feedback")]
pub async fn create_feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateFeedbackRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let request = CreateFeedback::try_from(payload.into_inner())?;
    let created = state.feedback.create(&actor, request).await?;
    Ok(HttpResponse::Created().json(FeedbackResponse::from(created)))
}

/// List feedback the authenticated manager has given.
#[utoipa::path(
    get,
    path = "/api/v1/feedback/given",
    responses(
        (status = 200, description = "Feedback given", body = [FeedbackResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "listFeedbackGiven"
)]
#[get("/feedback/given")]
pub async fn list_feedback_given(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FeedbackResponse>>> {
    let actor = session.require_user_id()?;
    let listed = state.feedback_query.list_given(&actor).await?;
    Ok(web::Json(
        listed.into_iter().map(FeedbackResponse::from).collect(),
    ))
}

/// List feedback addressed to the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/feedback/received",
    responses(
        (status = 200, description = "Feedback received", body = [FeedbackResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "listFeedbackReceived"
)]
#[get("/feedback/received")]
pub async fn list_feedback_received(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FeedbackResponse>>> {
    let actor = session.require_user_id()?;
    let listed = state.feedback_query.list_received(&actor).await?;
    Ok(web::Json(
        listed.into_iter().map(FeedbackResponse::from).collect(),
    ))
}

/// Partially update a feedback record the authenticated manager authored.
#[utoipa::path(
    put,
    path = "/api/v1/feedback/{id}",
    request_body = UpdateFeedbackRequest,
    params(("id" = String, Path, description = "Feedback identifier")),
    responses(
        (status = 200, description = "Feedback updated", body = FeedbackResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Feedback not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "updateFeedback"
)]
#[put("/feedback/{id}")]
pub async fn update_feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateFeedbackRequest>,
) -> ApiResult<web::Json<FeedbackResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_feedback_id(&path.into_inner())?;
    let patch = FeedbackPatch::try_from(payload.into_inner())?;
    let updated = state.feedback.update(&actor, &id, patch).await?;
    Ok(web::Json(FeedbackResponse::from(updated)))
}

/// Acknowledge a feedback record addressed to the authenticated employee.
///
/// Repeat acknowledgments succeed without changing the stored timestamp.
#[utoipa::path(
    post,
    path = "/api/v1/feedback/{id}/acknowledge",
    params(("id" = String, Path, description = "Feedback identifier")),
    responses(
        (status = 200, description = "Feedback acknowledged", body = FeedbackResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Feedback not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "acknowledgeFeedback"
)]
#[post("/feedback/{id}/acknowledge")]
pub async fn acknowledge_feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<FeedbackResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_feedback_id(&path.into_inner())?;
    let acknowledged = state.feedback.acknowledge(&actor, &id).await?;
    Ok(web::Json(FeedbackResponse::from(acknowledged)))
}
