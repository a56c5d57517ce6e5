//! Game configuration.

use serde::{Deserialize, Serialize};

/// Standard cribbage target.
pub const WINNING_SCORE: u8 = 121;

/// Per-game rule parameters.
///
/// Copied into every `Game` so a stored snapshot carries the rules it was
/// played under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Score that ends the game. Scores are clamped to this value.
    pub winning_score: u8,

    /// Upper bound on the shuffle count a deal action may request.
    /// Repeated shuffles add no entropy past the first, so this only limits work.
    pub max_shuffles: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            winning_score: WINNING_SCORE,
            max_shuffles: 100,
        }
    }
}

impl GameConfig {
    pub fn with_winning_score(mut self, score: u8) -> Self {
        self.winning_score = score;
        self
    }

    pub fn with_max_shuffles(mut self, max: u32) -> Self {
        self.max_shuffles = max;
        self
    }
}
