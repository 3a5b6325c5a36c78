use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::{
    models::MatchDescriptor,
    repository::MatchRepository,
    types::{
        CorrectHoleScoresRequest, CreateMatchRequest, SubmitScoresRequest, SubmitScoresResponse,
    },
    validation::{validate_create_request, validate_submission},
};
use crate::hub::{EventType, FinalScore, HubHandle, MatchCompletedPayload, ScoreUpdatedPayload};
use crate::scoring::{
    aggregate_player_stats, CalculatorSelector, HoleResult, HoleScore, MatchStatus,
    ScoringCalculator, TournamentPlayerStats,
};
use crate::shared::AppError;

/// Runs hole submissions end to end: validate, score, fold, persist, record
/// statistics on completion and publish the change to the tournament.
#[derive(Clone)]
pub struct ScoringService {
    repository: Arc<dyn MatchRepository>,
    hub: HubHandle,
    match_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl ScoringService {
    pub fn new(repository: Arc<dyn MatchRepository>, hub: HubHandle) -> Self {
        Self {
            repository,
            hub,
            match_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    #[instrument(skip(self, request), fields(tournament_id = %request.tournament_id))]
    pub async fn create_match(
        &self,
        request: CreateMatchRequest,
    ) -> Result<MatchDescriptor, AppError> {
        let format = validate_create_request(&request)?;

        let descriptor = MatchDescriptor::new(
            request.tournament_id,
            format,
            request.total_holes,
            request.team1_id,
            request.team2_id,
            request.roster,
        );
        self.repository.create_match(&descriptor).await?;

        info!(match_id = %descriptor.id, format = %format, "Match created");
        Ok(descriptor)
    }

    pub async fn list_matches(
        &self,
        tournament_id: Option<&str>,
    ) -> Result<Vec<MatchDescriptor>, AppError> {
        self.repository.list_matches(tournament_id).await
    }

    pub async fn get_match(&self, match_id: &str) -> Result<MatchDescriptor, AppError> {
        self.repository
            .get_match(match_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))
    }

    /// Hole history and the standing derived from it
    #[instrument(skip(self))]
    pub async fn match_scores(
        &self,
        match_id: &str,
    ) -> Result<(MatchDescriptor, Vec<HoleResult>, MatchStatus), AppError> {
        let descriptor = self.get_match(match_id).await?;
        let history = self.repository.hole_results(match_id).await?;

        let status = CalculatorSelector::for_format(descriptor.format).calculate_match_status(
            &history,
            descriptor.total_holes,
            &descriptor.team1_id,
            &descriptor.team2_id,
        )?;

        Ok((descriptor, history, status))
    }

    /// Scores one hole. Submissions for the same match are serialized; a
    /// resubmitted hole replaces the earlier result.
    #[instrument(skip(self, request), fields(hole_number = request.hole_number))]
    pub async fn submit_hole_scores(
        &self,
        match_id: &str,
        request: SubmitScoresRequest,
    ) -> Result<SubmitScoresResponse, AppError> {
        // Unknown matches never get a lock entry
        self.get_match(match_id).await?;

        let lock = self.match_lock(match_id).await;
        let result = async {
            let _guard = lock.lock().await;
            let descriptor = self.get_match(match_id).await?;
            self.score_hole(&descriptor, request.hole_number, &request.scores)
                .await
        }
        .await;
        self.release_match_lock(match_id, lock).await;

        result
    }

    /// Replaces individual players' strokes on one hole and rescores it.
    /// Players not named in `request` keep their recorded strokes.
    #[instrument(skip(self, request), fields(correction_count = request.scores.len()))]
    pub async fn correct_hole_scores(
        &self,
        match_id: &str,
        hole_number: u32,
        request: CorrectHoleScoresRequest,
    ) -> Result<SubmitScoresResponse, AppError> {
        if request.scores.is_empty() {
            return Err(AppError::BadRequest(
                "at least one corrected score is required".to_string(),
            ));
        }
        self.get_match(match_id).await?;

        let lock = self.match_lock(match_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.apply_correction(match_id, hole_number, request.scores)
                .await
        };
        self.release_match_lock(match_id, lock).await;

        result
    }

    async fn apply_correction(
        &self,
        match_id: &str,
        hole_number: u32,
        corrections: Vec<HoleScore>,
    ) -> Result<SubmitScoresResponse, AppError> {
        let descriptor = self.get_match(match_id).await?;
        // The corrections alone must already be acceptable, duplicates included
        validate_submission(&descriptor, hole_number, &corrections)?;

        let mut scores = self
            .repository
            .hole_results(match_id)
            .await?
            .into_iter()
            .find(|hole| hole.hole_number == hole_number)
            .map(|hole| hole.scores)
            .unwrap_or_default();

        for correction in corrections {
            match scores
                .iter_mut()
                .find(|score| score.player_id == correction.player_id)
            {
                Some(existing) => existing.strokes = correction.strokes,
                None => scores.push(correction),
            }
        }

        debug!(
            match_id = %match_id,
            hole_number,
            score_count = scores.len(),
            "Hole scores merged with corrections"
        );

        self.score_hole(&descriptor, hole_number, &scores).await
    }

    /// Validate, score, fold, persist and publish one hole. Callers hold the match lock.
    async fn score_hole(
        &self,
        descriptor: &MatchDescriptor,
        hole_number: u32,
        scores: &[HoleScore],
    ) -> Result<SubmitScoresResponse, AppError> {
        let match_id = descriptor.id.as_str();
        let team_scores = validate_submission(descriptor, hole_number, scores)?;

        let calculator = CalculatorSelector::for_format(descriptor.format);
        let hole_result = calculator.calculate_hole_result(
            hole_number,
            &team_scores.team1,
            &team_scores.team2,
            &descriptor.team1_id,
            &descriptor.team2_id,
        )?;

        // Fold the candidate history first so a bad history rejects the
        // submission before anything is stored
        let mut history = self.repository.hole_results(match_id).await?;
        history.retain(|hole| hole.hole_number != hole_result.hole_number);
        history.push(hole_result.clone());
        history.sort_by_key(|hole| hole.hole_number);

        let match_status = calculator.calculate_match_status(
            &history,
            descriptor.total_holes,
            &descriptor.team1_id,
            &descriptor.team2_id,
        )?;

        let player_stats = if match_status.match_complete && !descriptor.is_completed() {
            Some(aggregate_player_stats(
                &descriptor.roster,
                &descriptor.team1_id,
                &descriptor.team2_id,
                &history,
            )?)
        } else {
            None
        };

        self.repository
            .upsert_hole_result(match_id, &hole_result)
            .await?;

        debug!(
            match_id = %match_id,
            winner_team_id = ?hole_result.winner_team_id,
            team1_total_points = match_status.team1_total_points,
            team2_total_points = match_status.team2_total_points,
            "Hole scored"
        );

        self.hub.publish_to_tournament(
            &descriptor.tournament_id,
            EventType::ScoreUpdated,
            &ScoreUpdatedPayload {
                match_id: match_id.to_string(),
                hole_number: hole_result.hole_number,
                hole_result: hole_result.clone(),
                match_status: match_status.clone(),
            },
        );

        if let Some(player_stats) = player_stats {
            if self.repository.mark_completed(match_id).await? {
                self.repository
                    .merge_player_stats(&descriptor.tournament_id, &player_stats)
                    .await?;

                info!(
                    match_id = %match_id,
                    winner_team_id = ?match_status.winner_team_id,
                    "Match completed"
                );

                self.hub.publish_to_tournament(
                    &descriptor.tournament_id,
                    EventType::MatchCompleted,
                    &MatchCompletedPayload {
                        match_id: match_id.to_string(),
                        winner_team_id: match_status.winner_team_id.clone(),
                        final_score: FinalScore {
                            team1_points: match_status.team1_total_points,
                            team2_points: match_status.team2_total_points,
                        },
                    },
                );
            }
        }

        Ok(SubmitScoresResponse {
            match_id: match_id.to_string(),
            hole_result,
            match_status,
        })
    }

    pub async fn tournament_stats(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<TournamentPlayerStats>, AppError> {
        self.repository.tournament_stats(tournament_id).await
    }

    async fn match_lock(&self, match_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.match_locks.lock().await;
        Arc::clone(locks.entry(match_id.to_string()).or_default())
    }

    /// Drops the map entry once no other submission holds or waits on it
    async fn release_match_lock(&self, match_id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.match_locks.lock().await;
        // One reference in the map, one here
        if Arc::strong_count(&lock) == 2 {
            locks.remove(match_id);
        }
    }
}
