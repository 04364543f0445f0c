use crate::{board::Board, types::*};

/// Simple material evaluation from `side`'s perspective.
///
/// The General is worth 1000, so losing it dominates any other imbalance.
pub fn evaluate(board: &Board, side: Side) -> i32 {
    board
        .pieces()
        .map(|pc| {
            let v = pc.kind.value();
            if pc.side == side { v } else { -v }
        })
        .sum()
}
