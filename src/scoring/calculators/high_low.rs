use super::{highest_strokes, lowest_strokes, ScoringCalculator};
use crate::scoring::{errors::ScoringError, format::MatchFormat, models::HoleScore};

/// Team total is its best ball plus its worst ball
#[derive(Debug, Clone, Copy, Default)]
pub struct HighLowCalculator;

impl ScoringCalculator for HighLowCalculator {
    fn format(&self) -> MatchFormat {
        MatchFormat::HighLow
    }

    fn check_scores(&self, team1: &[HoleScore], team2: &[HoleScore]) -> Result<(), ScoringError> {
        if team1.len() < 2 || team2.len() < 2 {
            return Err(ScoringError::HighLowRequiresTwoPlayers);
        }
        Ok(())
    }

    fn team_score(&self, scores: &[HoleScore]) -> u32 {
        let low = lowest_strokes(scores).unwrap_or_default();
        let high = highest_strokes(scores).unwrap_or_default();
        low + high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(prefix: &str, strokes: &[u32]) -> Vec<HoleScore> {
        strokes
            .iter()
            .enumerate()
            .map(|(i, s)| HoleScore::new(format!("{prefix}{i}"), *s))
            .collect()
    }

    #[test]
    fn sums_low_and_high_and_halves_equal_totals() {
        let result = HighLowCalculator
            .calculate_hole_result(1, &team("a", &[4, 6]), &team("b", &[5, 5]), "team1", "team2")
            .unwrap();

        assert_eq!(result.team1_score, Some(10));
        assert_eq!(result.team2_score, Some(10));
        assert_eq!(result.winner_team_id, None);
        assert_eq!(result.team1_points, 0.5);
        assert_eq!(result.team2_points, 0.5);
    }

    #[test]
    fn middle_scores_do_not_count() {
        let result = HighLowCalculator
            .calculate_hole_result(
                4,
                &team("a", &[3, 9, 6, 4]),
                &team("b", &[5, 6]),
                "t1",
                "t2",
            )
            .unwrap();

        assert_eq!(result.team1_score, Some(12));
        assert_eq!(result.team2_score, Some(11));
        assert_eq!(result.winner_team_id.as_deref(), Some("t2"));
    }

    #[test]
    fn rejects_a_team_with_fewer_than_two_scores() {
        let short_team1 =
            HighLowCalculator.calculate_hole_result(1, &team("a", &[4]), &team("b", &[5, 5]), "t1", "t2");
        let short_team2 =
            HighLowCalculator.calculate_hole_result(1, &team("a", &[4, 4]), &team("b", &[5]), "t1", "t2");

        assert_eq!(short_team1, Err(ScoringError::HighLowRequiresTwoPlayers));
        assert_eq!(short_team2, Err(ScoringError::HighLowRequiresTwoPlayers));
    }
}
