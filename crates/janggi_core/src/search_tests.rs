use super::*;

use crate::movegen::all_legal_moves;

const MATE_IN_ONE: &str = "3k5/8R/9/9/9/R8/9/9/4K4/9";
const HANGING_CHARIOT: &str = "9/3k5/9/9/9/r5R2/9/9/4K4/9";

fn pos(file: u8, rank: u8) -> Position {
    Position::new(file, rank)
}

fn state(fen: &str) -> GameState {
    GameState::from_fen(fen).unwrap()
}

/// Minimax without pruning, used as the reference for alpha-beta.
fn plain_minimax(board: &mut Board, me: Side, depth: u8, maximizing: bool) -> i32 {
    if depth == 0 {
        return evaluate(board, me);
    }
    let side = if maximizing { me } else { me.other() };
    let moves = all_legal_moves(board, side);
    if moves.is_empty() {
        if is_in_check(board, side) {
            return if maximizing { -MATE_SCORE } else { MATE_SCORE };
        }
        return 0;
    }
    let scores = moves.into_iter().map(|mv| {
        let mut child = board.apply(mv);
        plain_minimax(&mut child, me, depth - 1, !maximizing)
    });
    if maximizing {
        scores.max().unwrap()
    } else {
        scores.min().unwrap()
    }
}

fn plain_root(state: &GameState, depth: u8) -> Option<(Move, i32)> {
    let me = state.side_to_move();
    let mut board = state.board().clone();
    let mut best: Option<(Move, i32)> = None;
    for mv in all_legal_moves(&board, me) {
        let score = {
            let mut child = board.apply(mv);
            plain_minimax(&mut child, me, depth - 1, false)
        };
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    best
}

#[test]
fn test_depth_zero_rejected() {
    let mut nodes = 0;
    assert_eq!(
        pick_best_move(&GameState::default(), 0, &mut nodes),
        Err(GameError::InvalidSearchState)
    );
    assert_eq!(nodes, 0);
}

#[test]
fn test_finished_game_rejected() {
    let mut game = crate::Game::default();
    game.apply_pass().unwrap();
    game.apply_pass().unwrap();
    assert_eq!(
        choose_move(game.state(), 2),
        Err(GameError::InvalidSearchState)
    );
}

#[test]
fn test_finds_mate_in_one() {
    let state = state(MATE_IN_ONE);
    let mut nodes = 0;
    for depth in [2, 3] {
        let (mv, score) = pick_best_move(&state, depth, &mut nodes).unwrap().unwrap();
        assert_eq!(mv, Move::new(pos(0, 5), pos(0, 0)));
        assert_eq!(score, MATE_SCORE);
    }
    assert!(nodes > 0);
}

#[test]
fn test_depth_one_sees_only_material() {
    // No capture available, so the first generated move wins the tie.
    let mut nodes = 0;
    let best = pick_best_move(&state(MATE_IN_ONE), 1, &mut nodes).unwrap();
    assert_eq!(best, Some((Move::new(pos(8, 1), pos(7, 1)), 26)));
}

#[test]
fn test_takes_free_chariot() {
    let state = state(HANGING_CHARIOT);
    for depth in 1..=3 {
        let mut nodes = 0;
        let best = pick_best_move(&state, depth, &mut nodes).unwrap();
        assert_eq!(best, Some((Move::new(pos(6, 5), pos(0, 5)), 13)), "depth {depth}");
    }
}

#[test]
fn test_no_legal_move_returns_none() {
    let stalemated = state("3k5/8R/9/9/9/4R4/9/9/4K4/ppppppppp b");
    assert_eq!(choose_move(&stalemated, 2), Ok(None));
}

#[test]
fn test_search_leaves_state_untouched() {
    let state = GameState::default();
    let before = state.clone();
    choose_move(&state, 2).unwrap();
    assert_eq!(state, before);
}

#[test]
fn test_alpha_beta_matches_plain_minimax() {
    let positions = [
        (GameState::default(), 2),
        (state(MATE_IN_ONE), 3),
        (state(HANGING_CHARIOT), 3),
        (state("9/4k4/9/4p4/9/4C4/9/9/4K4/9 b"), 3),
    ];
    for (state, depth) in positions {
        let mut nodes = 0;
        let pruned = pick_best_move(&state, depth, &mut nodes).unwrap();
        assert_eq!(pruned, plain_root(&state, depth), "{}", state.board().to_fen());
    }
}

#[test]
fn test_pruning_visits_fewer_nodes() {
    let mut pruned = 0;
    pick_best_move(&GameState::default(), 3, &mut pruned).unwrap();
    // Full tree below the start position is 31 + 961 + 30353 nodes.
    assert!(pruned < 31 + 961 + 30353);
}
