use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::hub::{handler::websocket_handler, HubError, HubHandle};
use crate::matches::{self, repository::MatchRepository, service::ScoringService};
use crate::scoring::ScoringError;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub scoring_service: ScoringService,
    pub hub: HubHandle,
}

impl AppState {
    pub fn new(match_repository: Arc<dyn MatchRepository>, hub: HubHandle) -> Self {
        let scoring_service = ScoringService::new(match_repository, hub.clone());
        Self {
            scoring_service,
            hub,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error(transparent)]
    Hub(#[from] HubError),

    #[error("Internal server error")]
    Internal,
}

impl From<ScoringError> for AppError {
    fn from(error: ScoringError) -> Self {
        if error.is_validation() {
            AppError::BadRequest(error.to_string())
        } else {
            AppError::DataIntegrity(error.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::DataIntegrity(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Data integrity error: {}", msg),
            ),
            AppError::Hub(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// All HTTP and WebSocket routes with tracing and CORS applied
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/match-formats", get(matches::list_match_formats))
        .route(
            "/matches",
            get(matches::list_matches).post(matches::create_match),
        )
        .route("/matches/:match_id", get(matches::get_match))
        .route(
            "/matches/:match_id/scores",
            get(matches::get_match_scores).post(matches::submit_hole_scores),
        )
        .route(
            "/matches/:match_id/scores/:hole_number",
            patch(matches::correct_hole_scores),
        )
        .route(
            "/tournaments/:tournament_id/stats",
            get(matches::get_tournament_stats),
        )
        .route("/ws/tournaments/:tournament_id", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
