use std::collections::HashSet;

use super::{
    errors::ScoringError,
    models::{HoleResult, MatchStatus},
};

/// Folds a match's recorded holes into its running standing.
///
/// The match ends early once the lead is larger than the number of holes left
/// to play (the trailing team can no longer catch up). Otherwise it ends when
/// every hole has been played, with no winner if the points are level.
///
/// Pure: the same history always yields the same status.
pub fn calculate_match_status(
    hole_results: &[HoleResult],
    total_holes: u32,
    team1_id: &str,
    team2_id: &str,
) -> Result<MatchStatus, ScoringError> {
    check_history(hole_results, total_holes)?;

    let (team1_total_points, team2_total_points) = hole_results
        .iter()
        .fold((0.0_f64, 0.0_f64), |(team1, team2), hole| {
            (team1 + hole.team1_points, team2 + hole.team2_points)
        });

    let holes_completed = hole_results.len() as u32;
    let holes_remaining = total_holes - holes_completed;

    let leader = if team1_total_points > team2_total_points {
        Some(team1_id)
    } else if team2_total_points > team1_total_points {
        Some(team2_id)
    } else {
        None
    };

    let clinched = (team1_total_points - team2_total_points).abs() > f64::from(holes_remaining);
    let match_complete = clinched || holes_remaining == 0;

    Ok(MatchStatus {
        team1_total_points,
        team2_total_points,
        holes_completed,
        holes_remaining,
        match_complete,
        winner_team_id: if match_complete {
            leader.map(str::to_string)
        } else {
            None
        },
    })
}

fn check_history(hole_results: &[HoleResult], total_holes: u32) -> Result<(), ScoringError> {
    if hole_results.len() > total_holes as usize {
        return Err(ScoringError::TooManyHoles {
            completed: hole_results.len(),
            total_holes,
        });
    }

    let mut seen = HashSet::with_capacity(hole_results.len());
    for hole in hole_results {
        if hole.hole_number == 0 || hole.hole_number > total_holes {
            return Err(ScoringError::HoleOutOfRange {
                hole_number: hole.hole_number,
                total_holes,
            });
        }
        if !seen.insert(hole.hole_number) {
            return Err(ScoringError::DuplicateHole(hole.hole_number));
        }
        if !is_valid_award(hole.team1_points, hole.team2_points) {
            return Err(ScoringError::InvalidHolePoints {
                hole_number: hole.hole_number,
                team1_points: hole.team1_points,
                team2_points: hole.team2_points,
            });
        }
    }

    Ok(())
}

fn is_valid_award(team1_points: f64, team2_points: f64) -> bool {
    matches!(
        (team1_points, team2_points),
        (1.0, 0.0) | (0.0, 1.0) | (0.5, 0.5)
    )
}
