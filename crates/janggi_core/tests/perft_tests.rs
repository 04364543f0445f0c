use std::time::Instant;

use rayon::prelude::*;

use janggi_core::{Board, Formation, PieceKind, Side, all_legal_moves, is_in_check, perft};

const FULL_PERFT_ENV: &str = "FULL_PERFT";

/// Generals face each other with Cannons and Guards crowding both palaces.
const PALACE_FEN: &str = "R3k3r/3a1a3/4c4/9/9/9/9/4C4/3A1A3/r3K3R";
/// Horses and Cannons aimed at lightly guarded palaces.
const CANNON_FEN: &str = "3ak4/4a4/4c4/2n6/9/9/6N2/4C4/4A4/3AK4";

fn formation(index: u8) -> Formation {
    Formation::try_from(index).expect("formation index in range")
}

#[test]
fn perft_shallow_every_formation_pair() {
    let pairs: Vec<(Formation, Formation)> = Formation::ALL
        .iter()
        .flat_map(|&first| Formation::ALL.iter().map(move |&second| (first, second)))
        .collect();

    pairs.par_iter().for_each(|&(first, second)| {
        let mut board = Board::startpos(first, second);
        assert_eq!(perft(&mut board, Side::First, 1), 31, "{first:?}/{second:?}");
        assert_eq!(perft(&mut board, Side::First, 2), 961, "{first:?}/{second:?}");
    });
}

#[test]
fn perft_depth_three() {
    let cases = [
        ((0, 0), 30_353),
        ((1, 2), 30_506),
        ((3, 3), 30_506),
        ((2, 1), 30_659),
    ];

    cases.par_iter().for_each(|&((first, second), expected)| {
        let start = Instant::now();
        let mut board = Board::startpos(formation(first), formation(second));
        let before = board.clone();
        let got = perft(&mut board, Side::First, 3);
        assert!(
            got == expected,
            "Perft mismatch for formations {first}/{second} at depth 3: expected {expected}, got {got}"
        );
        assert_eq!(board, before, "perft must leave the board as it found it");
        if std::env::var(FULL_PERFT_ENV).is_ok() {
            eprintln!(
                "formations {first}/{second}: {got} nodes in {:.2?}",
                start.elapsed()
            );
        }
    });
}

/// Plays every legal move to `depth`, checking that none leaves the mover's
/// General attacked and that each one is fully undone. Returns leaf count.
fn walk_legal_tree(board: &mut Board, side: Side, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for mv in all_legal_moves(board, side) {
        let before = board.clone();
        let takes_general = board
            .get(mv.to)
            .is_some_and(|t| t.kind == PieceKind::General && t.side != side);
        {
            let mut child = board.apply(mv);
            assert!(
                takes_general || !is_in_check(&child, side),
                "{mv} leaves {side} in check: {}",
                child.to_fen()
            );
            nodes += if takes_general {
                1
            } else {
                walk_legal_tree(&mut child, side.other(), depth - 1)
            };
        }
        assert_eq!(*board, before, "{mv} was not undone");
    }
    nodes
}

#[test]
fn legal_moves_never_expose_own_general() {
    let mut positions = vec![
        (Board::startpos(Formation::default(), Formation::default()), Side::First),
        (Board::from_fen(PALACE_FEN).unwrap(), Side::First),
        (Board::from_fen(PALACE_FEN).unwrap(), Side::Second),
        (Board::from_fen(CANNON_FEN).unwrap(), Side::First),
        (Board::from_fen(CANNON_FEN).unwrap(), Side::Second),
    ];

    positions.par_iter_mut().for_each(|(board, side)| {
        let before = board.clone();
        let nodes = walk_legal_tree(board, *side, 3);
        assert!(nodes > 0, "{}", before.to_fen());
        assert_eq!(*board, before);
    });
}

#[test]
fn walk_matches_perft_from_start() {
    let mut board = Board::startpos(Formation::default(), Formation::default());
    assert_eq!(walk_legal_tree(&mut board, Side::First, 3), 30_353);
}

#[test]
fn perft_depth_zero_is_one() {
    let mut board = Board::startpos(Formation::default(), Formation::default());
    assert_eq!(perft(&mut board, Side::Second, 0), 1);
}
