use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::{MatchFormat, RosterEntry};

/// A head-to-head match between two teams, as every calculation reads it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDescriptor {
    pub id: String,
    pub tournament_id: String,
    pub format: MatchFormat,
    pub total_holes: u32,
    pub team1_id: String,
    pub team2_id: String,
    pub roster: Vec<RosterEntry>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>, // set once, when statistics were recorded
}

impl MatchDescriptor {
    /// Creates a match descriptor with a generated ID
    pub fn new(
        tournament_id: String,
        format: MatchFormat,
        total_holes: u32,
        team1_id: String,
        team2_id: String,
        roster: Vec<RosterEntry>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tournament_id,
            format,
            total_holes,
            team1_id,
            team2_id,
            roster,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn team_of(&self, player_id: &str) -> Option<&str> {
        self.roster
            .iter()
            .find(|entry| entry.player_id == player_id)
            .map(|entry| entry.team_id.as_str())
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
