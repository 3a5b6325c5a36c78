use std::cmp::Ordering;

use enum_dispatch::enum_dispatch;

use super::{
    errors::ScoringError,
    format::MatchFormat,
    models::{HoleResult, HoleScore, MatchStatus},
    status,
};

pub use alternate_shot::AlternateShotCalculator;
pub use high_low::HighLowCalculator;
pub use lowest_ball::{
    BestBallCalculator, MatchPlayCalculator, ScrambleCalculator, ShambleCalculator,
};

mod alternate_shot;
mod high_low;
mod lowest_ball;

/// Rules for turning raw strokes into hole outcomes for one match format.
///
/// Implementors only decide how a team's aggregate is derived and which score
/// lists are acceptable. Awarding the hole and folding hole results into a
/// match status are shared by every format.
#[enum_dispatch]
pub trait ScoringCalculator {
    fn format(&self) -> MatchFormat;

    /// Rejects score lists that do not satisfy the format's cardinality
    fn check_scores(&self, team1: &[HoleScore], team2: &[HoleScore]) -> Result<(), ScoringError>;

    /// Aggregate for one team. Only called once `check_scores` has passed.
    fn team_score(&self, scores: &[HoleScore]) -> u32;

    fn calculate_hole_result(
        &self,
        hole_number: u32,
        team1_scores: &[HoleScore],
        team2_scores: &[HoleScore],
        team1_id: &str,
        team2_id: &str,
    ) -> Result<HoleResult, ScoringError> {
        self.check_scores(team1_scores, team2_scores)?;

        let team1_score = self.team_score(team1_scores);
        let team2_score = self.team_score(team2_scores);

        let scores = team1_scores
            .iter()
            .chain(team2_scores.iter())
            .cloned()
            .collect();

        Ok(award_hole(
            hole_number,
            team1_score,
            team2_score,
            team1_id,
            team2_id,
            scores,
        ))
    }

    fn calculate_match_status(
        &self,
        hole_results: &[HoleResult],
        total_holes: u32,
        team1_id: &str,
        team2_id: &str,
    ) -> Result<MatchStatus, ScoringError> {
        status::calculate_match_status(hole_results, total_holes, team1_id, team2_id)
    }
}

/// A calculator for any supported format
#[enum_dispatch(ScoringCalculator)]
#[derive(Debug, Clone, Copy)]
pub enum FormatCalculator {
    MatchPlay(MatchPlayCalculator),
    Scramble(ScrambleCalculator),
    BestBall(BestBallCalculator),
    AlternateShot(AlternateShotCalculator),
    HighLow(HighLowCalculator),
    Shamble(ShambleCalculator),
}

/// Lower aggregate takes the hole outright, equal aggregates halve it
fn award_hole(
    hole_number: u32,
    team1_score: u32,
    team2_score: u32,
    team1_id: &str,
    team2_id: &str,
    scores: Vec<HoleScore>,
) -> HoleResult {
    let (winner_team_id, team1_points, team2_points) = match team1_score.cmp(&team2_score) {
        Ordering::Less => (Some(team1_id.to_string()), 1.0, 0.0),
        Ordering::Greater => (Some(team2_id.to_string()), 0.0, 1.0),
        Ordering::Equal => (None, 0.5, 0.5),
    };

    HoleResult {
        hole_number,
        team1_score: Some(team1_score),
        team2_score: Some(team2_score),
        winner_team_id,
        team1_points,
        team2_points,
        scores,
    }
}

fn lowest_strokes(scores: &[HoleScore]) -> Option<u32> {
    scores.iter().map(|score| score.strokes).min()
}

fn highest_strokes(scores: &[HoleScore]) -> Option<u32> {
    scores.iter().map(|score| score.strokes).max()
}
