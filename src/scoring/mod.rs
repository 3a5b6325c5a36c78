pub mod calculators;
pub mod side_games;

mod errors;
mod format;
pub mod models;
mod selector;
mod stats;
mod status;

pub use calculators::{FormatCalculator, ScoringCalculator};
pub use errors::ScoringError;
pub use format::{MatchFormat, ScoreRequirement};
pub use models::*;
pub use selector::CalculatorSelector;
pub use stats::aggregate_player_stats;
pub use status::calculate_match_status;
