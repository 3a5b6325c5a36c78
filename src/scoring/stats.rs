use std::collections::HashMap;

use super::{
    errors::ScoringError,
    models::{HoleResult, PlayerMatchStats, RosterEntry},
};

/// Per-player won/lost/tied deltas for one completed match.
///
/// Every participant who appears in at least one hole score gets an entry,
/// in order of first appearance. Each hole is judged from the participant's
/// team: won if that team took it, tied if halved, lost otherwise.
/// `points_won`/`points_lost` carry the match points of the player's team and
/// of the opposing team.
///
/// Callers must invoke this once per completed match; the output is meant to be
/// merged additively into tournament totals.
pub fn aggregate_player_stats(
    roster: &[RosterEntry],
    team1_id: &str,
    team2_id: &str,
    hole_results: &[HoleResult],
) -> Result<Vec<PlayerMatchStats>, ScoringError> {
    let team_of: HashMap<&str, &str> = roster
        .iter()
        .map(|entry| (entry.player_id.as_str(), entry.team_id.as_str()))
        .collect();

    let (team1_points, team2_points) = hole_results.iter().fold((0.0, 0.0), |(t1, t2), hole| {
        (t1 + hole.team1_points, t2 + hole.team2_points)
    });

    let mut order: Vec<&str> = Vec::new();
    let mut stats: HashMap<&str, PlayerMatchStats> = HashMap::new();

    for hole in hole_results {
        for score in &hole.scores {
            let player_id = score.player_id.as_str();
            let team_id = *team_of
                .get(player_id)
                .ok_or_else(|| ScoringError::UnknownParticipant(player_id.to_string()))?;

            let entry = stats.entry(player_id).or_insert_with(|| {
                order.push(player_id);
                let (points_won, points_lost) = if team_id == team1_id {
                    (team1_points, team2_points)
                } else if team_id == team2_id {
                    (team2_points, team1_points)
                } else {
                    (0.0, 0.0)
                };
                PlayerMatchStats {
                    player_id: player_id.to_string(),
                    team_id: team_id.to_string(),
                    holes_won: 0,
                    holes_lost: 0,
                    holes_tied: 0,
                    points_won,
                    points_lost,
                }
            });

            match hole.winner_team_id.as_deref() {
                None => entry.holes_tied += 1,
                Some(winner) if winner == team_id => entry.holes_won += 1,
                Some(_) => entry.holes_lost += 1,
            }
        }
    }

    Ok(order
        .into_iter()
        .filter_map(|player_id| stats.remove(player_id))
        .collect())
}
