//! Random Move Janggi Engine
//!
//! A simple engine that selects moves uniformly at random from all legal moves.
//! Useful for:
//! - Baseline comparisons in self-play (the classical engine should easily beat this)
//! - Stress testing move generation and the end-of-game rules

use janggi_core::{all_legal_moves_into, Engine, GameError, GameState, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// A janggi engine that plays random legal moves.
///
/// The depth argument is only validated, never searched.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    nodes: u64,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            nodes: 0,
        }
    }

    /// Reproducible move choice for tests and recorded self-play.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            nodes: 0,
        }
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, state: &GameState, depth: u8) -> Result<SearchResult, GameError> {
        if depth == 0 || state.is_over() {
            return Err(GameError::InvalidSearchState);
        }

        let mut board = state.board().clone();
        let mut moves = Vec::with_capacity(64);
        all_legal_moves_into(&mut board, state.side_to_move(), &mut moves);

        self.nodes = 1;

        let best_move = moves.choose(&mut self.rng).copied();

        Ok(SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: self.nodes,
        })
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
