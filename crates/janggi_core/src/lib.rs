pub mod attacks;
pub mod board;
pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod rules;
pub mod search;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use attacks::*;
pub use board::*;
pub use error::*;
pub use eval::evaluate;
pub use game::*;
pub use movegen::*;
pub use perft::perft;
pub use rules::Rules;
pub use search::{choose_move, pick_best_move, MATE_SCORE};
pub use types::*;

/// Search depth for difficulty levels 1 through 9.
pub const LEVEL_DEPTHS: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// Search depth for a difficulty level; out-of-range levels clamp to 1..=9.
pub fn depth_for_level(level: u8) -> u8 {
    LEVEL_DEPTHS[(level.clamp(1, 9) - 1) as usize]
}

// =============================================================================
// Engine trait, implemented by every move chooser (classical, random)
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Material score from the searching side's perspective
    pub score: i32,
    /// Search depth used
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
}

/// Trait that all engines must implement.
///
/// This allows the driver to swap the alpha-beta engine for a baseline.
pub trait Engine: Send {
    /// Search the position to the given depth.
    ///
    /// Fails with [`GameError::InvalidSearchState`] for depth 0 or a
    /// finished game.
    fn search(&mut self, state: &GameState, depth: u8) -> Result<SearchResult, GameError>;

    /// Returns the engine's name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
