//! Error types for rule evaluation and notation parsing.
//!
//! Every error here is local and recoverable: the caller re-prompts instead of
//! aborting, and no failed operation leaves the game mutated.

use crate::types::{Move, Position};

/// Errors returned by [`crate::Game`] and the search entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The cell is empty or holds a piece of the side not on move.
    #[error("no piece of the side to move at {0}")]
    InvalidSelection(Position),

    /// The move is not among the legal moves of the selected piece.
    #[error("illegal move {0}")]
    IllegalMove(Move),

    #[error("nothing to undo")]
    NothingToUndo,

    /// Search was asked for depth 0 or on a finished game.
    #[error("search cannot run: depth must be at least 1 and the game must be in progress")]
    InvalidSearchState,

    #[error("the game is over")]
    GameOver,
}

/// Errors from parsing coordinates, moves and board notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid coordinate `{0}`")]
    Coordinate(String),

    #[error("invalid move `{0}`")]
    Move(String),

    #[error("invalid side `{0}`")]
    Side(String),

    #[error("formation index {0} out of range 0..=3")]
    Formation(u8),

    #[error("invalid board notation: {0}")]
    Board(String),
}
