use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    // Validation errors: the input is rejected before any state change
    #[error("both teams must have at least one score")]
    MissingTeamScores,

    #[error("high-low requires at least 2 players per team")]
    HighLowRequiresTwoPlayers,

    #[error("alternate shot requires exactly one score per team")]
    AlternateShotRequiresOneScore,

    #[error("unsupported match format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid score for {player_id}: {strokes} strokes (must be between 1 and 15)")]
    InvalidStrokes { player_id: String, strokes: u32 },

    #[error("player not in this match: {0}")]
    UnknownParticipant(String),

    #[error("player submitted more than one score: {0}")]
    DuplicateParticipant(String),

    #[error("invalid hole number {hole_number} for a {total_holes}-hole match")]
    InvalidHoleNumber { hole_number: u32, total_holes: u32 },

    #[error("nassau requires an 18-hole match, got {0} holes")]
    NassauRequiresEighteenHoles(u32),

    // Aggregation errors: the recorded hole history is inconsistent
    #[error("{completed} holes recorded for a {total_holes}-hole match")]
    TooManyHoles { completed: usize, total_holes: u32 },

    #[error("hole {0} recorded more than once")]
    DuplicateHole(u32),

    #[error("hole {hole_number} is outside a {total_holes}-hole match")]
    HoleOutOfRange { hole_number: u32, total_holes: u32 },

    #[error("hole {hole_number} awarded {team1_points}/{team2_points} points")]
    InvalidHolePoints {
        hole_number: u32,
        team1_points: f64,
        team2_points: f64,
    },
}

impl ScoringError {
    /// Whether the error rejects caller input, as opposed to flagging bad history
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScoringError::MissingTeamScores
                | ScoringError::HighLowRequiresTwoPlayers
                | ScoringError::AlternateShotRequiresOneScore
                | ScoringError::UnsupportedFormat(_)
                | ScoringError::InvalidStrokes { .. }
                | ScoringError::UnknownParticipant(_)
                | ScoringError::DuplicateParticipant(_)
                | ScoringError::InvalidHoleNumber { .. }
                | ScoringError::NassauRequiresEighteenHoles(_)
        )
    }
}
