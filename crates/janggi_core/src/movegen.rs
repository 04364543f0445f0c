use crate::{attacks::is_in_check, board::Board, types::*};

/// Orthogonal directions in generation order.
const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// (destination, blocking orthogonal step) for the Horse.
const HORSE_STEPS: [((i8, i8), (i8, i8)); 8] = [
    ((1, 2), (0, 1)),
    ((-1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((-1, -2), (0, -1)),
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
];

/// (destination, first block, second block) for the Elephant.
const ELEPHANT_STEPS: [((i8, i8), (i8, i8), (i8, i8)); 8] = [
    ((2, 3), (0, 1), (1, 2)),
    ((-2, 3), (0, 1), (-1, 2)),
    ((2, -3), (0, -1), (1, -2)),
    ((-2, -3), (0, -1), (-1, -2)),
    ((3, 2), (1, 0), (2, 1)),
    ((3, -2), (1, 0), (2, -1)),
    ((-3, 2), (-1, 0), (-2, 1)),
    ((-3, -2), (-1, 0), (-2, -1)),
];

/// Generate legal moves for `piece`, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into` on a scratch copy of the board.
pub fn legal_moves(board: &Board, piece: &Piece) -> Vec<Move> {
    let mut tmp = board.clone();
    let mut out = Vec::with_capacity(32);
    legal_moves_into(&mut tmp, *piece, &mut out);
    out
}

/// Generate legal moves for `piece` into the provided buffer, reusing it across calls.
///
/// Each candidate is played on `board` and undone before the next one is
/// tried, so the board is unchanged when this returns.
pub fn legal_moves_into(board: &mut Board, piece: Piece, out: &mut Vec<Move>) {
    out.clear();
    push_legal_moves(board, piece, out);
}

/// Every legal move of `side`, in board scan order then per-piece order.
pub fn all_legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut tmp = board.clone();
    let mut out = Vec::with_capacity(64);
    all_legal_moves_into(&mut tmp, side, &mut out);
    out
}

pub fn all_legal_moves_into(board: &mut Board, side: Side, out: &mut Vec<Move>) {
    out.clear();
    let pieces: Vec<Piece> = board.pieces_of(side).copied().collect();
    for piece in pieces {
        push_legal_moves(board, piece, out);
    }
}

/// True if `side` has at least one legal move.
pub fn has_legal_move(board: &mut Board, side: Side) -> bool {
    let pieces: Vec<Piece> = board.pieces_of(side).copied().collect();
    let mut buf = Vec::with_capacity(32);
    pieces.into_iter().any(|pc| {
        legal_moves_into(board, pc, &mut buf);
        !buf.is_empty()
    })
}

fn push_legal_moves(board: &mut Board, piece: Piece, out: &mut Vec<Move>) {
    let from = piece.position();
    for to in pseudo_legal_moves(board, &piece) {
        let mv = Move::new(from, to);
        // Taking the enemy General ends the game, so self-check is irrelevant.
        let takes_general = board
            .get(to)
            .is_some_and(|t| t.kind == PieceKind::General && t.side != piece.side);
        if takes_general {
            out.push(mv);
            continue;
        }
        let exposed = {
            let next = board.apply(mv);
            is_in_check(&next, piece.side)
        };
        if !exposed {
            out.push(mv);
        }
    }
}

pub fn pseudo_legal_moves(board: &Board, piece: &Piece) -> Vec<Position> {
    let mut out = Vec::with_capacity(32);
    pseudo_legal_into(board, piece, &mut out);
    out
}

/// Destinations allowed by the piece's movement pattern and board occupancy,
/// ignoring self-check. Clears `out` first.
pub fn pseudo_legal_into(board: &Board, piece: &Piece, out: &mut Vec<Position>) {
    out.clear();
    let from = piece.position();
    let side = piece.side;
    match piece.kind {
        PieceKind::Soldier => gen_soldier(board, from, side, out),
        PieceKind::Chariot => {
            for (df, dr) in ORTHOGONAL {
                gen_slide(board, from, side, df, dr, out);
            }
            gen_palace_steps(board, from, side, out);
        }
        PieceKind::Cannon => gen_cannon(board, from, side, out),
        PieceKind::Horse => gen_horse(board, from, side, out),
        PieceKind::Elephant => gen_elephant(board, from, side, out),
        PieceKind::General | PieceKind::Guard => gen_palace_piece(board, from, side, out),
    }
}

fn push_step(board: &Board, side: Side, to: Option<Position>, out: &mut Vec<Position>) {
    if let Some(to) = to {
        match board.get(to) {
            Some(pc) if pc.side == side => {}
            _ => out.push(to),
        }
    }
}

/// Cells on one of the palace diagonals.
fn on_palace_diagonal(p: Position) -> bool {
    p.is_palace_center() || p.is_palace_corner()
}

fn gen_soldier(board: &Board, from: Position, side: Side, out: &mut Vec<Position>) {
    let fwd = side.forward();
    push_step(board, side, from.offset(0, fwd), out);
    push_step(board, side, from.offset(-1, 0), out);
    push_step(board, side, from.offset(1, 0), out);

    if !from.in_any_palace() {
        return;
    }
    if from.is_palace_center() {
        push_step(board, side, from.offset(-1, fwd), out);
        push_step(board, side, from.offset(1, fwd), out);
    } else if from.is_palace_corner() {
        let center = from.palace_center();
        if from.rank as i8 + fwd == center.rank as i8 {
            push_step(board, side, Some(center), out);
        }
    }
}

fn gen_slide(board: &Board, from: Position, side: Side, df: i8, dr: i8, out: &mut Vec<Position>) {
    let mut cur = from;
    while let Some(to) = cur.offset(df, dr) {
        match board.get(to) {
            None => out.push(to),
            Some(pc) if pc.side != side => {
                out.push(to);
                break;
            }
            _ => break,
        }
        cur = to;
    }
}

/// Chariot steps along the palace diagonals: corner to centre, or centre to
/// any corner. One step only.
fn gen_palace_steps(board: &Board, from: Position, side: Side, out: &mut Vec<Position>) {
    if from.is_palace_center() {
        for (df, dr) in DIAGONAL {
            push_step(board, side, from.offset(df, dr), out);
        }
    } else if from.is_palace_corner() {
        push_step(board, side, Some(from.palace_center()), out);
    }
}

fn gen_cannon(board: &Board, from: Position, side: Side, out: &mut Vec<Position>) {
    for (df, dr) in ORTHOGONAL {
        let mut screened = false;
        let mut cur = from;
        while let Some(to) = cur.offset(df, dr) {
            cur = to;
            match (screened, board.get(to)) {
                (false, None) => {}
                // A Cannon can never serve as the screen.
                (false, Some(pc)) if pc.kind == PieceKind::Cannon => break,
                (false, Some(_)) => screened = true,
                (true, None) => out.push(to),
                (true, Some(pc)) => {
                    if pc.side != side && pc.kind != PieceKind::Cannon {
                        out.push(to);
                    }
                    break;
                }
            }
        }
    }

    // Corner to opposite corner over a non-Cannon piece on the palace centre.
    if from.is_palace_corner() {
        let center = from.palace_center();
        let screen_ok = board
            .get(center)
            .is_some_and(|pc| pc.kind != PieceKind::Cannon);
        if screen_ok {
            let to = Position::new(8 - from.file, 2 * center.rank - from.rank);
            match board.get(to) {
                None => out.push(to),
                Some(pc) if pc.side != side && pc.kind != PieceKind::Cannon => out.push(to),
                _ => {}
            }
        }
    }
}

fn gen_horse(board: &Board, from: Position, side: Side, out: &mut Vec<Position>) {
    for ((df, dr), (bf, br)) in HORSE_STEPS {
        let open = from.offset(bf, br).is_some_and(|p| board.is_empty_at(p));
        if open {
            push_step(board, side, from.offset(df, dr), out);
        }
    }
}

fn gen_elephant(board: &Board, from: Position, side: Side, out: &mut Vec<Position>) {
    for ((df, dr), (af, ar), (bf, br)) in ELEPHANT_STEPS {
        let open = from.offset(af, ar).is_some_and(|p| board.is_empty_at(p))
            && from.offset(bf, br).is_some_and(|p| board.is_empty_at(p));
        if open {
            push_step(board, side, from.offset(df, dr), out);
        }
    }
}

/// General and Guard: one step, confined to their own palace.
fn gen_palace_piece(board: &Board, from: Position, side: Side, out: &mut Vec<Position>) {
    let in_own_palace = |p: &Position| p.in_palace(side);
    for (df, dr) in ORTHOGONAL {
        push_step(board, side, from.offset(df, dr).filter(in_own_palace), out);
    }
    if on_palace_diagonal(from) {
        for (df, dr) in DIAGONAL {
            push_step(board, side, from.offset(df, dr).filter(in_own_palace), out);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
