// Formats where a team's hole score is simply its best (lowest) ball.

use super::{lowest_strokes, ScoringCalculator};
use crate::scoring::{errors::ScoringError, format::MatchFormat, models::HoleScore};

fn require_both_teams(team1: &[HoleScore], team2: &[HoleScore]) -> Result<(), ScoringError> {
    if team1.is_empty() || team2.is_empty() {
        return Err(ScoringError::MissingTeamScores);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchPlayCalculator;

impl ScoringCalculator for MatchPlayCalculator {
    fn format(&self) -> MatchFormat {
        MatchFormat::MatchPlay
    }

    fn check_scores(&self, team1: &[HoleScore], team2: &[HoleScore]) -> Result<(), ScoringError> {
        require_both_teams(team1, team2)
    }

    fn team_score(&self, scores: &[HoleScore]) -> u32 {
        lowest_strokes(scores).unwrap_or_default()
    }
}

/// Everyone hits, the team plays the best shot, so the team records its best ball
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrambleCalculator;

impl ScoringCalculator for ScrambleCalculator {
    fn format(&self) -> MatchFormat {
        MatchFormat::Scramble
    }

    fn check_scores(&self, team1: &[HoleScore], team2: &[HoleScore]) -> Result<(), ScoringError> {
        require_both_teams(team1, team2)
    }

    fn team_score(&self, scores: &[HoleScore]) -> u32 {
        lowest_strokes(scores).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BestBallCalculator;

impl ScoringCalculator for BestBallCalculator {
    fn format(&self) -> MatchFormat {
        MatchFormat::BestBall
    }

    fn check_scores(&self, team1: &[HoleScore], team2: &[HoleScore]) -> Result<(), ScoringError> {
        require_both_teams(team1, team2)
    }

    fn team_score(&self, scores: &[HoleScore]) -> u32 {
        lowest_strokes(scores).unwrap_or_default()
    }
}

/// Drive selection is not tracked; after the drive each player holes out and
/// the best ball counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShambleCalculator;

impl ScoringCalculator for ShambleCalculator {
    fn format(&self) -> MatchFormat {
        MatchFormat::Shamble
    }

    fn check_scores(&self, team1: &[HoleScore], team2: &[HoleScore]) -> Result<(), ScoringError> {
        require_both_teams(team1, team2)
    }

    fn team_score(&self, scores: &[HoleScore]) -> u32 {
        lowest_strokes(scores).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::calculators::FormatCalculator;
    use rstest::rstest;

    fn team(strokes: &[u32]) -> Vec<HoleScore> {
        strokes
            .iter()
            .enumerate()
            .map(|(i, s)| HoleScore::new(format!("player{i}"), *s))
            .collect()
    }

    #[test]
    fn match_play_takes_each_teams_best_ball() {
        let result = MatchPlayCalculator
            .calculate_hole_result(1, &team(&[4, 5]), &team(&[5, 6]), "team1", "team2")
            .unwrap();

        assert_eq!(result.team1_score, Some(4));
        assert_eq!(result.team2_score, Some(5));
        assert_eq!(result.winner_team_id.as_deref(), Some("team1"));
        assert_eq!(result.team1_points, 1.0);
        assert_eq!(result.team2_points, 0.0);
    }

    #[rstest]
    #[case::match_play(FormatCalculator::from(MatchPlayCalculator))]
    #[case::scramble(FormatCalculator::from(ScrambleCalculator))]
    #[case::best_ball(FormatCalculator::from(BestBallCalculator))]
    #[case::shamble(FormatCalculator::from(ShambleCalculator))]
    fn aggregate_is_the_minimum(#[case] calculator: FormatCalculator) {
        let result = calculator
            .calculate_hole_result(3, &team(&[7, 3, 5]), &team(&[4, 9]), "t1", "t2")
            .unwrap();

        assert_eq!(result.team1_score, Some(3));
        assert_eq!(result.team2_score, Some(4));
        assert_eq!(result.winner_team_id.as_deref(), Some("t1"));
    }

    #[rstest]
    #[case::match_play(FormatCalculator::from(MatchPlayCalculator))]
    #[case::scramble(FormatCalculator::from(ScrambleCalculator))]
    #[case::best_ball(FormatCalculator::from(BestBallCalculator))]
    #[case::shamble(FormatCalculator::from(ShambleCalculator))]
    fn empty_team_is_rejected(#[case] calculator: FormatCalculator) {
        let missing_team2 = calculator.calculate_hole_result(1, &team(&[4]), &[], "t1", "t2");
        let missing_team1 = calculator.calculate_hole_result(1, &[], &team(&[4]), "t1", "t2");

        assert_eq!(missing_team2, Err(ScoringError::MissingTeamScores));
        assert_eq!(missing_team1, Err(ScoringError::MissingTeamScores));
    }

    #[test]
    fn single_player_teams_are_accepted() {
        let result = ScrambleCalculator
            .calculate_hole_result(1, &team(&[5]), &team(&[4]), "t1", "t2")
            .unwrap();

        assert_eq!(result.winner_team_id.as_deref(), Some("t2"));
    }
}
