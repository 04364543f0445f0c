use crate::{board::Board, movegen::all_legal_moves_into, types::*};

/// Pure perft node count.
/// Counts all legal move sequences of `depth` plies, sides alternating from `side`.
pub fn perft(board: &mut Board, side: Side, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(board: &mut Board, side: Side, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }

        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        all_legal_moves_into(board, side, buf);

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            let mut child = board.apply(mv);
            nodes += inner(&mut child, side.other(), depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(board, side, depth, &mut layers[..])
}
