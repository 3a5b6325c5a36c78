use serde::{Deserialize, Serialize};

/// A single player's stroke count on one hole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleScore {
    #[serde(rename = "user_id")]
    pub player_id: String,
    pub strokes: u32,
}

impl HoleScore {
    pub fn new(player_id: impl Into<String>, strokes: u32) -> Self {
        Self {
            player_id: player_id.into(),
            strokes,
        }
    }
}

/// Which team a participant plays for in a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: String,
    pub team_id: String,
}

impl RosterEntry {
    pub fn new(player_id: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            team_id: team_id.into(),
        }
    }
}

/// Outcome of one hole between the two teams of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleResult {
    pub hole_number: u32,
    pub team1_score: Option<u32>, // None when the format produces no single team score
    pub team2_score: Option<u32>,
    pub winner_team_id: Option<String>, // None for a halved hole
    pub team1_points: f64,
    pub team2_points: f64,
    pub scores: Vec<HoleScore>,
}

impl HoleResult {
    pub fn is_halved(&self) -> bool {
        self.winner_team_id.is_none()
    }
}

/// Running standing of a match, derived from its hole results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatus {
    pub team1_total_points: f64,
    pub team2_total_points: f64,
    pub holes_completed: u32,
    pub holes_remaining: u32,
    pub match_complete: bool,
    pub winner_team_id: Option<String>,
}

/// One player's record over a single completed match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchStats {
    pub player_id: String,
    pub team_id: String,
    pub holes_won: u32,
    pub holes_lost: u32,
    pub holes_tied: u32,
    pub points_won: f64,
    pub points_lost: f64,
}

/// Running totals for one player across every completed match of a tournament
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentPlayerStats {
    pub player_id: String,
    pub team_id: String,
    pub matches_played: u32,
    pub holes_won: u32,
    pub holes_lost: u32,
    pub holes_tied: u32,
    pub points_won: f64,
    pub points_lost: f64,
}

impl TournamentPlayerStats {
    pub fn new(player_id: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            team_id: team_id.into(),
            ..Self::default()
        }
    }

    /// Folds one match's delta into the running total
    pub fn merge(&mut self, delta: &PlayerMatchStats) {
        self.team_id = delta.team_id.clone();
        self.matches_played += 1;
        self.holes_won += delta.holes_won;
        self.holes_lost += delta.holes_lost;
        self.holes_tied += delta.holes_tied;
        self.points_won += delta.points_won;
        self.points_lost += delta.points_lost;
    }
}
