// Auxiliary games read from a match's hole history. None of them feed back
// into the match status.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    errors::ScoringError,
    models::{HoleResult, MatchStatus},
    status::calculate_match_status,
};

/// Skins with carry-over: a halved hole's skin rolls forward and the next
/// outright winner collects it. Skins still carried at the end of the history
/// stay unawarded.
///
/// Returns hole number -> winning team id.
pub fn calculate_skins(hole_results: &[HoleResult]) -> BTreeMap<u32, String> {
    let mut skins = BTreeMap::new();
    let mut carried: Vec<u32> = Vec::new();

    for hole in hole_results {
        match &hole.winner_team_id {
            Some(winner) => {
                for hole_number in carried.drain(..) {
                    skins.insert(hole_number, winner.clone());
                }
                skins.insert(hole.hole_number, winner.clone());
            }
            None => carried.push(hole.hole_number),
        }
    }

    skins
}

/// Three matches in one: front nine, back nine and the full eighteen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NassauResult {
    pub front_nine: MatchStatus,
    pub back_nine: MatchStatus,
    pub overall: MatchStatus,
}

pub fn calculate_nassau(
    hole_results: &[HoleResult],
    total_holes: u32,
    team1_id: &str,
    team2_id: &str,
) -> Result<NassauResult, ScoringError> {
    if total_holes != 18 {
        return Err(ScoringError::NassauRequiresEighteenHoles(total_holes));
    }

    let (front, back): (Vec<HoleResult>, Vec<HoleResult>) = hole_results
        .iter()
        .cloned()
        .partition(|hole| hole.hole_number <= 9);

    // The back nine is its own 9-hole match, so its holes are renumbered 1..=9
    let back: Vec<HoleResult> = back
        .into_iter()
        .map(|mut hole| {
            hole.hole_number = hole.hole_number.saturating_sub(9);
            hole
        })
        .collect();

    Ok(NassauResult {
        front_nine: calculate_match_status(&front, 9, team1_id, team2_id)?,
        back_nine: calculate_match_status(&back, 9, team1_id, team2_id)?,
        overall: calculate_match_status(hole_results, 18, team1_id, team2_id)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stableford {
    Standard,
    Modified,
}

impl Stableford {
    /// Points for one player's strokes on a hole of the given par.
    /// Any `u32` pair is in range for `i64`.
    pub fn points(&self, strokes: u32, par: u32) -> i64 {
        let under_par = i64::from(par) - i64::from(strokes);
        match self {
            Stableford::Standard => match under_par {
                d if d >= 2 => 4 + (d - 2),
                1 => 3,
                0 => 2,
                -1 => 1,
                _ => 0,
            },
            Stableford::Modified => match under_par {
                d if d >= 3 => 8 + (d - 3) * 2,
                2 => 5,
                1 => 2,
                0 => 0,
                -1 => -1,
                _ => -3,
            },
        }
    }

    /// Round total over paired (strokes, par) holes
    pub fn total(&self, holes: impl IntoIterator<Item = (u32, u32)>) -> i64 {
        holes
            .into_iter()
            .map(|(strokes, par)| self.points(strokes, par))
            .fold(0, i64::saturating_add)
    }
}
