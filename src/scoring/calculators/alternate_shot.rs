use super::ScoringCalculator;
use crate::scoring::{errors::ScoringError, format::MatchFormat, models::HoleScore};

/// Partners share one ball, so each team records a single score per hole
#[derive(Debug, Clone, Copy, Default)]
pub struct AlternateShotCalculator;

impl ScoringCalculator for AlternateShotCalculator {
    fn format(&self) -> MatchFormat {
        MatchFormat::AlternateShot
    }

    fn check_scores(&self, team1: &[HoleScore], team2: &[HoleScore]) -> Result<(), ScoringError> {
        if team1.len() != 1 || team2.len() != 1 {
            return Err(ScoringError::AlternateShotRequiresOneScore);
        }
        Ok(())
    }

    fn team_score(&self, scores: &[HoleScore]) -> u32 {
        scores.first().map(|score| score.strokes).unwrap_or_default()
    }
}
