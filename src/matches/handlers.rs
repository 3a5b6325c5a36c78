use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use strum::IntoEnumIterator;
use tracing::{info, instrument};

use super::{
    models::MatchDescriptor,
    types::{
        CorrectHoleScoresRequest, CreateMatchRequest, ListMatchesQuery, MatchFormatInfo, MatchResponse, MatchScoresResponse,
        SubmitScoresRequest, SubmitScoresResponse, TournamentStatsResponse,
    },
};
use crate::scoring::MatchFormat;
use crate::shared::{AppError, AppState};

/// GET /match-formats
pub async fn list_match_formats() -> Json<Vec<MatchFormatInfo>> {
    Json(MatchFormat::iter().map(MatchFormatInfo::from).collect())
}

/// POST /matches
#[instrument(name = "create_match", skip(state, request))]
pub async fn create_match(
    State(state): State<AppState>,
    Json(request): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<MatchDescriptor>), AppError> {
    let descriptor = state.scoring_service.create_match(request).await?;
    Ok((StatusCode::CREATED, Json(descriptor)))
}

/// GET /matches?tournament_id=...
#[instrument(name = "list_matches", skip(state))]
pub async fn list_matches(
    State(state): State<AppState>,
    Query(query): Query<ListMatchesQuery>,
) -> Result<Json<Vec<MatchDescriptor>>, AppError> {
    let matches = state
        .scoring_service
        .list_matches(query.tournament_id.as_deref())
        .await?;

    info!(match_count = matches.len(), "Matches listed");
    Ok(Json(matches))
}

/// GET /matches/:match_id
#[instrument(name = "get_match", skip(state))]
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchResponse>, AppError> {
    let (descriptor, _, status) = state.scoring_service.match_scores(&match_id).await?;
    Ok(Json(MatchResponse { descriptor, status }))
}

/// GET /matches/:match_id/scores
#[instrument(name = "get_match_scores", skip(state))]
pub async fn get_match_scores(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchScoresResponse>, AppError> {
    let (_, hole_results, match_status) = state.scoring_service.match_scores(&match_id).await?;
    Ok(Json(MatchScoresResponse {
        match_id,
        hole_results,
        match_status,
    }))
}

/// POST /matches/:match_id/scores
#[instrument(name = "submit_hole_scores", skip(state, request))]
pub async fn submit_hole_scores(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<SubmitScoresRequest>,
) -> Result<Json<SubmitScoresResponse>, AppError> {
    info!(
        match_id = %match_id,
        hole_number = request.hole_number,
        score_count = request.scores.len(),
        "Hole scores submitted"
    );

    let response = state
        .scoring_service
        .submit_hole_scores(&match_id, request)
        .await?;
    Ok(Json(response))
}

/// PATCH /matches/:match_id/scores/:hole_number
#[instrument(name = "correct_hole_scores", skip(state, request))]
pub async fn correct_hole_scores(
    State(state): State<AppState>,
    Path((match_id, hole_number)): Path<(String, u32)>,
    Json(request): Json<CorrectHoleScoresRequest>,
) -> Result<Json<SubmitScoresResponse>, AppError> {
    info!(
        match_id = %match_id,
        hole_number,
        score_count = request.scores.len(),
        "Hole score correction submitted"
    );

    let response = state
        .scoring_service
        .correct_hole_scores(&match_id, hole_number, request)
        .await?;
    Ok(Json(response))
}

/// GET /tournaments/:tournament_id/stats
#[instrument(name = "get_tournament_stats", skip(state))]
pub async fn get_tournament_stats(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> Result<Json<TournamentStatsResponse>, AppError> {
    let players = state.scoring_service.tournament_stats(&tournament_id).await?;
    Ok(Json(TournamentStatsResponse {
        tournament_id,
        players,
    }))
}
