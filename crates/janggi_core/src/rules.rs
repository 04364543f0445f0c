//! Adjudication constants and material scoring.

use serde::{Deserialize, Serialize};

use crate::{board::Board, types::Side};

/// Totals closer than this are a drawn adjudication.
const SCORE_EPSILON: f64 = 1e-6;

/// Tunable end-of-game constants. The defaults are the standard rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Total moves and passes after which the game is adjudicated.
    pub move_limit: u32,
    /// Bonus added to the Second side's material total.
    pub komi: f64,
    /// A side at or below this material total triggers adjudication.
    pub low_material: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            move_limit: 200,
            komi: 1.5,
            low_material: 10,
        }
    }
}

impl Rules {
    /// Material totals as scored at adjudication: `(first, second + komi)`.
    pub fn scores(&self, board: &Board) -> (f64, f64) {
        let first = board.material(Side::First) as f64;
        let second = board.material(Side::Second) as f64 + self.komi;
        (first, second)
    }

    /// Winner by material, or `None` for a draw.
    pub fn material_winner(&self, board: &Board) -> Option<Side> {
        let (first, second) = self.scores(board);
        if (first - second).abs() < SCORE_EPSILON {
            None
        } else if first > second {
            Some(Side::First)
        } else {
            Some(Side::Second)
        }
    }

    pub fn is_low_material(&self, board: &Board) -> bool {
        Side::BOTH
            .iter()
            .any(|&side| board.material(side) <= self.low_material)
    }
}
