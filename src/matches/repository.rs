use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::models::MatchDescriptor;
use crate::scoring::{HoleResult, PlayerMatchStats, TournamentPlayerStats};
use crate::shared::AppError;

/// Storage for matches, their hole history and tournament player totals
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn create_match(&self, descriptor: &MatchDescriptor) -> Result<(), AppError>;
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchDescriptor>, AppError>;

    /// All matches, or only those of one tournament
    async fn list_matches(
        &self,
        tournament_id: Option<&str>,
    ) -> Result<Vec<MatchDescriptor>, AppError>;

    /// Stores a hole result, replacing any earlier result for the same hole
    async fn upsert_hole_result(&self, match_id: &str, result: &HoleResult)
        -> Result<(), AppError>;

    /// Hole history ordered by hole number
    async fn hole_results(&self, match_id: &str) -> Result<Vec<HoleResult>, AppError>;

    /// Flags the match as completed. Returns `true` only for the call that
    /// performed the transition, so statistics are recorded exactly once.
    async fn mark_completed(&self, match_id: &str) -> Result<bool, AppError>;

    async fn merge_player_stats(
        &self,
        tournament_id: &str,
        stats: &[PlayerMatchStats],
    ) -> Result<(), AppError>;

    async fn tournament_stats(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<TournamentPlayerStats>, AppError>;
}

#[derive(Default)]
struct Store {
    matches: HashMap<String, MatchDescriptor>,
    hole_results: HashMap<String, BTreeMap<u32, HoleResult>>,
    tournament_stats: HashMap<String, BTreeMap<String, TournamentPlayerStats>>,
}

/// In-memory implementation of MatchRepository for development and testing
#[derive(Default)]
pub struct InMemoryMatchRepository {
    store: RwLock<Store>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    #[instrument(skip(self, descriptor), fields(match_id = %descriptor.id))]
    async fn create_match(&self, descriptor: &MatchDescriptor) -> Result<(), AppError> {
        let mut store = self.store.write().await;
        if store.matches.contains_key(&descriptor.id) {
            warn!("Match already exists in memory");
            return Err(AppError::Conflict(format!(
                "Match {} already exists",
                descriptor.id
            )));
        }

        store
            .matches
            .insert(descriptor.id.clone(), descriptor.clone());
        store
            .hole_results
            .insert(descriptor.id.clone(), BTreeMap::new());

        info!(
            tournament_id = %descriptor.tournament_id,
            format = %descriptor.format,
            total_holes = descriptor.total_holes,
            "Match created in memory"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchDescriptor>, AppError> {
        let store = self.store.read().await;
        let descriptor = store.matches.get(match_id).cloned();

        if descriptor.is_none() {
            debug!("Match not found in memory");
        }
        Ok(descriptor)
    }

    #[instrument(skip(self))]
    async fn list_matches(
        &self,
        tournament_id: Option<&str>,
    ) -> Result<Vec<MatchDescriptor>, AppError> {
        let store = self.store.read().await;
        let mut matches: Vec<MatchDescriptor> = store
            .matches
            .values()
            .filter(|m| tournament_id.map_or(true, |id| m.tournament_id == id))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        debug!(count = matches.len(), "Matches listed from memory");
        Ok(matches)
    }

    #[instrument(skip(self, result), fields(hole_number = result.hole_number))]
    async fn upsert_hole_result(
        &self,
        match_id: &str,
        result: &HoleResult,
    ) -> Result<(), AppError> {
        let mut store = self.store.write().await;
        let holes = store
            .hole_results
            .get_mut(match_id)
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))?;

        if holes
            .insert(result.hole_number, result.clone())
            .is_some()
        {
            debug!("Hole result replaced");
        } else {
            debug!("Hole result recorded");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn hole_results(&self, match_id: &str) -> Result<Vec<HoleResult>, AppError> {
        let store = self.store.read().await;
        let holes = store
            .hole_results
            .get(match_id)
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))?;

        Ok(holes.values().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn mark_completed(&self, match_id: &str) -> Result<bool, AppError> {
        let mut store = self.store.write().await;
        let descriptor = store
            .matches
            .get_mut(match_id)
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))?;

        if descriptor.completed_at.is_some() {
            debug!("Match already completed");
            return Ok(false);
        }

        descriptor.completed_at = Some(Utc::now());
        info!("Match marked completed");
        Ok(true)
    }

    #[instrument(skip(self, stats), fields(players = stats.len()))]
    async fn merge_player_stats(
        &self,
        tournament_id: &str,
        stats: &[PlayerMatchStats],
    ) -> Result<(), AppError> {
        let mut store = self.store.write().await;
        let totals = store
            .tournament_stats
            .entry(tournament_id.to_string())
            .or_default();

        for delta in stats {
            totals
                .entry(delta.player_id.clone())
                .or_insert_with(|| TournamentPlayerStats::new(&delta.player_id, &delta.team_id))
                .merge(delta);
        }

        info!("Player statistics merged into tournament totals");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn tournament_stats(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<TournamentPlayerStats>, AppError> {
        let store = self.store.read().await;
        Ok(store
            .tournament_stats
            .get(tournament_id)
            .map(|totals| totals.values().cloned().collect())
            .unwrap_or_default())
    }
}
