use serde::{Deserialize, Serialize};

use super::models::MatchDescriptor;
use crate::scoring::{
    HoleResult, HoleScore, MatchFormat, MatchStatus, RosterEntry, ScoreRequirement,
    TournamentPlayerStats,
};

/// Request payload for creating a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    pub tournament_id: String,
    pub format: String, // parsed on validation so unknown formats get a clear error
    pub total_holes: u32,
    pub team1_id: String,
    pub team2_id: String,
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitScoresRequest {
    pub hole_number: u32,
    pub scores: Vec<HoleScore>,
}

/// Strokes to overwrite on an already scored hole, keyed by player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectHoleScoresRequest {
    pub scores: Vec<HoleScore>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMatchesQuery {
    pub tournament_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitScoresResponse {
    pub match_id: String,
    pub hole_result: HoleResult,
    pub match_status: MatchStatus,
}

/// A match together with its current standing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub descriptor: MatchDescriptor,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScoresResponse {
    pub match_id: String,
    pub hole_results: Vec<HoleResult>,
    pub match_status: MatchStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchFormatInfo {
    pub id: MatchFormat,
    pub name: String,
    pub description: String,
    pub score_requirement: ScoreRequirement,
}

impl From<MatchFormat> for MatchFormatInfo {
    fn from(format: MatchFormat) -> Self {
        Self {
            id: format,
            name: format.display_name().to_string(),
            description: format.description().to_string(),
            score_requirement: format.score_requirement(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentStatsResponse {
    pub tournament_id: String,
    pub players: Vec<TournamentPlayerStats>,
}
