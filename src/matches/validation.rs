use std::collections::HashSet;
use std::str::FromStr;

use super::{models::MatchDescriptor, types::CreateMatchRequest};
use crate::scoring::{HoleScore, MatchFormat, ScoringError};
use crate::shared::AppError;

pub const MIN_STROKES: u32 = 1;
pub const MAX_STROKES: u32 = 15;
pub const MIN_HOLES: u32 = 6;
pub const MAX_HOLES: u32 = 18;

/// Scores split by roster team, in submission order within each team
#[derive(Debug, Clone, PartialEq)]
pub struct TeamScores {
    pub team1: Vec<HoleScore>,
    pub team2: Vec<HoleScore>,
}

/// Checks a hole submission against the match before anything is calculated
/// or stored, then splits the scores by team membership.
///
/// Cardinality per format is left to the calculator.
pub fn validate_submission(
    descriptor: &MatchDescriptor,
    hole_number: u32,
    scores: &[HoleScore],
) -> Result<TeamScores, ScoringError> {
    if hole_number == 0 || hole_number > descriptor.total_holes {
        return Err(ScoringError::InvalidHoleNumber {
            hole_number,
            total_holes: descriptor.total_holes,
        });
    }

    let mut seen = HashSet::with_capacity(scores.len());
    let mut team_scores = TeamScores {
        team1: Vec::new(),
        team2: Vec::new(),
    };

    for score in scores {
        if !(MIN_STROKES..=MAX_STROKES).contains(&score.strokes) {
            return Err(ScoringError::InvalidStrokes {
                player_id: score.player_id.clone(),
                strokes: score.strokes,
            });
        }

        let team_id = descriptor
            .team_of(&score.player_id)
            .ok_or_else(|| ScoringError::UnknownParticipant(score.player_id.clone()))?;

        if !seen.insert(score.player_id.as_str()) {
            return Err(ScoringError::DuplicateParticipant(score.player_id.clone()));
        }

        if team_id == descriptor.team1_id {
            team_scores.team1.push(score.clone());
        } else if team_id == descriptor.team2_id {
            team_scores.team2.push(score.clone());
        } else {
            // Roster entries are checked at creation, so this is a stray player
            return Err(ScoringError::UnknownParticipant(score.player_id.clone()));
        }
    }

    Ok(team_scores)
}

pub fn parse_format(identifier: &str) -> Result<MatchFormat, ScoringError> {
    MatchFormat::from_str(identifier)
        .map_err(|_| ScoringError::UnsupportedFormat(identifier.to_string()))
}

/// Rejects match definitions the scoring engine could not work with
pub fn validate_create_request(request: &CreateMatchRequest) -> Result<MatchFormat, AppError> {
    let format = parse_format(&request.format)?;

    if request.tournament_id.trim().is_empty() {
        return Err(AppError::BadRequest("tournament_id is required".to_string()));
    }
    if !(MIN_HOLES..=MAX_HOLES).contains(&request.total_holes) {
        return Err(AppError::BadRequest(format!(
            "total_holes must be between {} and {}",
            MIN_HOLES, MAX_HOLES
        )));
    }
    if request.team1_id.trim().is_empty() || request.team2_id.trim().is_empty() {
        return Err(AppError::BadRequest("both team ids are required".to_string()));
    }
    if request.team1_id == request.team2_id {
        return Err(AppError::BadRequest(
            "team1_id and team2_id must differ".to_string(),
        ));
    }

    let mut players = HashSet::new();
    for entry in &request.roster {
        if entry.team_id != request.team1_id && entry.team_id != request.team2_id {
            return Err(AppError::BadRequest(format!(
                "player {} is assigned to unknown team {}",
                entry.player_id, entry.team_id
            )));
        }
        if !players.insert(entry.player_id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "player {} appears on the roster more than once",
                entry.player_id
            )));
        }
    }

    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RosterEntry;
    use rstest::rstest;

    fn descriptor() -> MatchDescriptor {
        MatchDescriptor::new(
            "open".into(),
            MatchFormat::BestBall,
            9,
            "eagles".into(),
            "hawks".into(),
            vec![
                RosterEntry::new("alice", "eagles"),
                RosterEntry::new("carol", "hawks"),
                RosterEntry::new("bob", "eagles"),
                RosterEntry::new("dave", "hawks"),
            ],
        )
    }

    fn request() -> CreateMatchRequest {
        CreateMatchRequest {
            tournament_id: "open".into(),
            format: "high_low".into(),
            total_holes: 18,
            team1_id: "eagles".into(),
            team2_id: "hawks".into(),
            roster: vec![
                RosterEntry::new("alice", "eagles"),
                RosterEntry::new("carol", "hawks"),
            ],
        }
    }

    #[test]
    fn splits_scores_by_team_not_by_submission_order() {
        let scores = vec![
            HoleScore::new("alice", 4),
            HoleScore::new("bob", 5),
            HoleScore::new("carol", 6),
            HoleScore::new("dave", 3),
        ];

        let split = validate_submission(&descriptor(), 1, &scores).unwrap();

        assert_eq!(
            split.team1,
            vec![HoleScore::new("alice", 4), HoleScore::new("bob", 5)]
        );
        assert_eq!(
            split.team2,
            vec![HoleScore::new("carol", 6), HoleScore::new("dave", 3)]
        );
    }

    #[rstest]
    #[case::zero(0)]
    #[case::sixteen(16)]
    fn strokes_outside_range_are_rejected(#[case] strokes: u32) {
        let result = validate_submission(&descriptor(), 1, &[HoleScore::new("alice", strokes)]);

        assert_eq!(
            result,
            Err(ScoringError::InvalidStrokes {
                player_id: "alice".into(),
                strokes
            })
        );
    }

    #[test]
    fn unknown_and_duplicate_participants_are_rejected() {
        let unknown = validate_submission(&descriptor(), 1, &[HoleScore::new("mallory", 4)]);
        assert_eq!(
            unknown,
            Err(ScoringError::UnknownParticipant("mallory".into()))
        );

        let duplicate = validate_submission(
            &descriptor(),
            1,
            &[HoleScore::new("alice", 4), HoleScore::new("alice", 5)],
        );
        assert_eq!(
            duplicate,
            Err(ScoringError::DuplicateParticipant("alice".into()))
        );
    }

    #[rstest]
    #[case(0)]
    #[case(10)]
    fn hole_numbers_outside_the_match_are_rejected(#[case] hole_number: u32) {
        let result = validate_submission(&descriptor(), hole_number, &[HoleScore::new("alice", 4)]);

        assert_eq!(
            result,
            Err(ScoringError::InvalidHoleNumber {
                hole_number,
                total_holes: 9
            })
        );
    }

    #[test]
    fn accepts_a_well_formed_create_request() {
        assert_eq!(
            validate_create_request(&request()).unwrap(),
            MatchFormat::HighLow
        );
    }

    #[rstest]
    #[case::unknown_format(CreateMatchRequest { format: "medal".into(), ..request() })]
    #[case::too_few_holes(CreateMatchRequest { total_holes: 5, ..request() })]
    #[case::too_many_holes(CreateMatchRequest { total_holes: 19, ..request() })]
    #[case::same_teams(CreateMatchRequest { team2_id: "eagles".into(), ..request() })]
    #[case::stray_team(CreateMatchRequest {
        roster: vec![RosterEntry::new("alice", "owls")],
        ..request()
    })]
    #[case::duplicate_player(CreateMatchRequest {
        roster: vec![RosterEntry::new("alice", "eagles"), RosterEntry::new("alice", "hawks")],
        ..request()
    })]
    fn rejects_malformed_create_requests(#[case] request: CreateMatchRequest) {
        assert!(matches!(
            validate_create_request(&request),
            Err(AppError::BadRequest(_))
        ));
    }
}
