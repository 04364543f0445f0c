//! Classical Janggi Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over a material evaluation.
//! The search itself lives in `janggi_core`; this crate puts it behind the
//! [`Engine`] trait and keeps node statistics.

use janggi_core::{pick_best_move, Engine, GameError, GameState, SearchResult};


/// Classical janggi engine using minimax with alpha-beta pruning.
#[derive(Debug, Clone, Default)]
pub struct ClassicalEngine {
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    /// Nodes visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, state: &GameState, depth: u8) -> Result<SearchResult, GameError> {
        self.nodes = 0;

        let best = pick_best_move(state, depth, &mut self.nodes)?;

        Ok(SearchResult {
            best_move: best.map(|(mv, _)| mv),
            score: best.map(|(_, s)| s).unwrap_or(0),
            depth,
            nodes: self.nodes,
        })
    }

    fn name(&self) -> &str {
        "Classical v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
