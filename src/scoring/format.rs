use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The closed set of team match formats the engine can score
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchFormat {
    MatchPlay,
    Scramble,
    BestBall,
    AlternateShot,
    HighLow,
    Shamble,
}

/// How many scores each team must submit for a hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "count", rename_all = "snake_case")]
pub enum ScoreRequirement {
    AtLeast(usize),
    Exactly(usize),
}

impl ScoreRequirement {
    pub fn is_met_by(&self, count: usize) -> bool {
        match self {
            ScoreRequirement::AtLeast(min) => count >= *min,
            ScoreRequirement::Exactly(n) => count == *n,
        }
    }
}

impl MatchFormat {
    pub fn display_name(&self) -> &'static str {
        match self {
            MatchFormat::MatchPlay => "Match Play",
            MatchFormat::Scramble => "Scramble",
            MatchFormat::BestBall => "Best Ball",
            MatchFormat::AlternateShot => "Alternate Shot",
            MatchFormat::HighLow => "High-Low",
            MatchFormat::Shamble => "Shamble",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MatchFormat::MatchPlay => "Lowest score on each team wins the hole",
            MatchFormat::Scramble => {
                "Every player hits, the team plays the best shot; one team score per hole"
            }
            MatchFormat::BestBall => "Each player plays their own ball; best score counts",
            MatchFormat::AlternateShot => "Partners alternate shots on a single ball",
            MatchFormat::HighLow => "Team total is its best score plus its worst score",
            MatchFormat::Shamble => "Best drive is selected, then everyone plays their own ball",
        }
    }

    pub fn score_requirement(&self) -> ScoreRequirement {
        match self {
            MatchFormat::AlternateShot => ScoreRequirement::Exactly(1),
            MatchFormat::HighLow => ScoreRequirement::AtLeast(2),
            MatchFormat::MatchPlay
            | MatchFormat::Scramble
            | MatchFormat::BestBall
            | MatchFormat::Shamble => ScoreRequirement::AtLeast(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn identifiers_round_trip_through_strings() {
        for format in MatchFormat::iter() {
            let identifier = format.to_string();
            assert_eq!(MatchFormat::from_str(&identifier).unwrap(), format);
        }
        assert_eq!(MatchFormat::AlternateShot.as_ref(), "alternate_shot");
    }

    #[test]
    fn serde_uses_snake_case_identifiers() {
        let json = serde_json::to_string(&MatchFormat::HighLow).unwrap();
        assert_eq!(json, "\"high_low\"");
        let parsed: MatchFormat = serde_json::from_str("\"best_ball\"").unwrap();
        assert_eq!(parsed, MatchFormat::BestBall);
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        assert!(MatchFormat::from_str("stroke_play").is_err());
        assert!(serde_json::from_str::<MatchFormat>("\"skins\"").is_err());
    }

    #[test]
    fn requirement_checks_counts() {
        assert!(ScoreRequirement::AtLeast(2).is_met_by(3));
        assert!(!ScoreRequirement::AtLeast(2).is_met_by(1));
        assert!(ScoreRequirement::Exactly(1).is_met_by(1));
        assert!(!ScoreRequirement::Exactly(1).is_met_by(2));
    }
}
