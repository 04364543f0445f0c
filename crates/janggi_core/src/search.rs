//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Scores are always from the perspective of the side to move at the root:
//! that side maximises, its opponent minimises.

use tracing::debug;

use crate::{
    attacks::is_in_check,
    board::Board,
    error::GameError,
    eval::evaluate,
    game::GameState,
    movegen::all_legal_moves_into,
    types::*,
};

/// Score of a node where the side to move is mated.
pub const MATE_SCORE: i32 = 10_000;
const INF: i32 = 1_000_000;

/// Best move for the side to move, or `None` if it has no legal move.
pub fn choose_move(state: &GameState, depth: u8) -> Result<Option<Move>, GameError> {
    let mut nodes = 0;
    Ok(pick_best_move(state, depth, &mut nodes)?.map(|(mv, _)| mv))
}

/// Searches the position and returns the best move with its score.
///
/// Every root move is searched with a full window, and ties keep the move
/// generated first. The state itself is never touched; the search runs on a
/// scratch copy of its board.
pub fn pick_best_move(
    state: &GameState,
    depth: u8,
    nodes: &mut u64,
) -> Result<Option<(Move, i32)>, GameError> {
    if depth == 0 || state.is_over() {
        return Err(GameError::InvalidSearchState);
    }

    let me = state.side_to_move();
    let mut board = state.board().clone();
    let mut moves = Vec::with_capacity(64);
    all_legal_moves_into(&mut board, me, &mut moves);

    let mut best: Option<(Move, i32)> = None;
    for mv in moves {
        let score = {
            let mut child = board.apply(mv);
            *nodes += 1;
            minimax(&mut child, me, depth - 1, -INF, INF, false, nodes)
        };
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    }

    debug!(side = %me, depth, nodes = *nodes, best = ?best, "search finished");
    Ok(best)
}

/// Recursive minimax with alpha-beta pruning. `me` is the root side.
pub fn minimax(
    board: &mut Board,
    me: Side,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    nodes: &mut u64,
) -> i32 {
    if depth == 0 {
        return evaluate(board, me);
    }

    let side = if maximizing { me } else { me.other() };
    let mut moves = Vec::with_capacity(64);
    all_legal_moves_into(board, side, &mut moves);

    if moves.is_empty() {
        if is_in_check(board, side) {
            return if maximizing { -MATE_SCORE } else { MATE_SCORE };
        }
        return 0; // Stalemate
    }

    if maximizing {
        let mut best = -INF;
        for mv in moves {
            let score = {
                let mut child = board.apply(mv);
                *nodes += 1;
                minimax(&mut child, me, depth - 1, alpha, beta, false, nodes)
            };
            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = INF;
        for mv in moves {
            let score = {
                let mut child = board.apply(mv);
                *nodes += 1;
                minimax(&mut child, me, depth - 1, alpha, beta, true, nodes)
            };
            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
