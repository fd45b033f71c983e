//! JSON API consumed by the learning front end.
//!
//! Endpoints:
//!
//! - `POST /api/practice-feedback`            — Critique an uploaded image
//! - `POST /api/practice-feedback/iterate`    — Iteration ideas for the last critique
//! - `POST /api/learning-assistant`           — Ask the assistant a question
//! - `GET  /api/learning-assistant/greeting`  — Opening message for a context
//! - `GET  /api/community-hub/data`           — Communities and engagement prompt
//! - `POST /api/community-hub/join`           — Join a community
//! - `POST /api/community-hub/post`           — Share a post
//! - `POST /api/community-hub/ai-draft-post`  — Suggested post draft
//!
//! Required fields are checked before the simulated delay, so a bad request
//! fails fast.

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use brushwise_core::community::{self, Acknowledgement, HubSnapshot, PostDraft};
use brushwise_core::error::require;
use brushwise_core::{Critique, Error};

use crate::SharedState;

// ── Router ────────────────────────────────────────────────────────────────

/// Build the API router. Nest this under "/api" in the main router.
pub fn api_router(state: SharedState) -> Router {
    Router::new()
        .route("/practice-feedback", post(practice_feedback_handler))
        .route("/practice-feedback/iterate", post(iterate_handler))
        .route("/learning-assistant", post(learning_assistant_handler))
        .route("/learning-assistant/greeting", get(greeting_handler))
        .route("/community-hub/data", get(community_data_handler))
        .route("/community-hub/join", post(join_handler))
        .route("/community-hub/post", post(post_handler))
        .route("/community-hub/ai-draft-post", post(draft_post_handler))
        .with_state(state)
}

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Domain errors rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::MissingInput { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Catalog(_) | Error::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            warn!(error = %self.0, "Rejected request");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackRequest {
    #[serde(default)]
    image_url: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct IterationsResponse {
    pub variations: Vec<String>,
}

#[derive(Deserialize)]
struct AssistantRequest {
    #[serde(default)]
    message: Option<String>,
    /// Context tag, e.g. "Practice Studio" or a course slug.
    #[serde(default)]
    context: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct AssistantResponse {
    pub response: String,
}

#[derive(Deserialize)]
struct ContextQuery {
    #[serde(default)]
    context: Option<String>,
}

#[derive(Deserialize)]
struct HubQuery {
    #[serde(default)]
    activity: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest {
    #[serde(default)]
    community_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostRequest {
    #[serde(default)]
    community_name: Option<String>,
    #[serde(default)]
    post_title: Option<String>,
    #[serde(default)]
    post_content: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftRequest {
    #[serde(default)]
    community_name: Option<String>,
    #[serde(default)]
    last_activity: Option<String>,
    #[serde(default)]
    project_topic: Option<String>,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn practice_feedback_handler(
    State(state): State<SharedState>,
    Json(req): Json<FeedbackRequest>,
) -> ApiResult<Critique> {
    let critique = state.critic.critique(req.image_url.as_deref())?.clone();
    state
        .simulate_latency(state.latency.practice_feedback_ms)
        .await;
    Ok(Json(critique))
}

async fn iterate_handler(State(state): State<SharedState>) -> Json<IterationsResponse> {
    state.simulate_latency(state.latency.iterate_ms).await;
    Json(IterationsResponse {
        variations: state.critic.iterations().to_vec(),
    })
}

async fn learning_assistant_handler(
    State(state): State<SharedState>,
    Json(req): Json<AssistantRequest>,
) -> ApiResult<AssistantResponse> {
    let message = require(req.message.as_deref(), "Message")?;
    let resolution = state.resolver.resolve(req.context.as_deref(), message);
    debug!(
        scope = resolution.scope,
        topic = resolution.topic,
        "Assistant answer selected"
    );
    let response = resolution.body.to_string();

    state
        .simulate_latency(state.latency.learning_assistant_ms)
        .await;
    Ok(Json(AssistantResponse { response }))
}

async fn greeting_handler(
    State(state): State<SharedState>,
    Query(query): Query<ContextQuery>,
) -> Json<AssistantResponse> {
    let greeting = state.resolver.greeting(query.context.as_deref());
    Json(AssistantResponse {
        response: greeting.body.to_string(),
    })
}

async fn community_data_handler(
    State(state): State<SharedState>,
    Query(query): Query<HubQuery>,
) -> Json<HubSnapshot> {
    let snapshot = community::hub_snapshot(query.activity.as_deref());
    state.simulate_latency(state.latency.community_data_ms).await;
    Json(snapshot)
}

async fn join_handler(
    State(state): State<SharedState>,
    Json(req): Json<JoinRequest>,
) -> ApiResult<Acknowledgement> {
    let ack = community::join(req.community_name.as_deref())?;
    state.simulate_latency(state.latency.join_ms).await;
    Ok(Json(ack))
}

async fn post_handler(
    State(state): State<SharedState>,
    Json(req): Json<PostRequest>,
) -> ApiResult<Acknowledgement> {
    let ack = community::publish(
        req.community_name.as_deref(),
        req.post_title.as_deref(),
        req.post_content.as_deref(),
    )?;
    state.simulate_latency(state.latency.post_ms).await;
    Ok(Json(ack))
}

async fn draft_post_handler(
    State(state): State<SharedState>,
    Json(req): Json<DraftRequest>,
) -> Json<&'static PostDraft> {
    debug!(
        community = ?req.community_name,
        last_activity = ?req.last_activity,
        topic = ?req.project_topic,
        "Drafting post"
    );
    let draft = community::draft_for(req.project_topic.as_deref());
    state.simulate_latency(state.latency.draft_ms).await;
    Json(draft)
}
