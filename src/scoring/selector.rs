use std::str::FromStr;

use super::{
    calculators::{
        AlternateShotCalculator, BestBallCalculator, FormatCalculator, HighLowCalculator,
        MatchPlayCalculator, ScrambleCalculator, ShambleCalculator,
    },
    errors::ScoringError,
    format::MatchFormat,
};

/// Maps a match's declared format to the calculator that scores it
pub struct CalculatorSelector;

impl CalculatorSelector {
    pub fn for_format(format: MatchFormat) -> FormatCalculator {
        match format {
            MatchFormat::MatchPlay => MatchPlayCalculator.into(),
            MatchFormat::Scramble => ScrambleCalculator.into(),
            MatchFormat::BestBall => BestBallCalculator.into(),
            MatchFormat::AlternateShot => AlternateShotCalculator.into(),
            MatchFormat::HighLow => HighLowCalculator.into(),
            MatchFormat::Shamble => ShambleCalculator.into(),
        }
    }

    /// Resolves a raw format identifier, e.g. one read back from storage.
    /// Anything outside the known set is an error, never a fallback format.
    pub fn from_identifier(identifier: &str) -> Result<FormatCalculator, ScoringError> {
        MatchFormat::from_str(identifier)
            .map(Self::for_format)
            .map_err(|_| ScoringError::UnsupportedFormat(identifier.to_string()))
    }
}
