//! Check detection built on pseudo-legal move generation.

use crate::{board::Board, movegen::pseudo_legal_into, types::*};

/// Whether `side`'s General is attacked. A side without a General counts as
/// in check.
pub fn is_in_check(board: &Board, side: Side) -> bool {
    match board.general(side) {
        Some(general) => is_attacked(board, general, side.other()),
        None => true,
    }
}

/// Whether any piece of `by` has a pseudo-legal move onto `target`.
pub fn is_attacked(board: &Board, target: Position, by: Side) -> bool {
    let mut buf = Vec::with_capacity(32);
    board.pieces_of(by).any(|pc| {
        pseudo_legal_into(board, pc, &mut buf);
        buf.contains(&target)
    })
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
