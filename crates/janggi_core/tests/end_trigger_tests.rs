//! Tests for game-ending conditions in janggi
//!
//! This module tests every way a game can end:
//! - Checkmate and capture of the General
//! - Stalemate (not an ending: the stalemated side passes)
//! - Move limit
//! - Double pass
//! - Low material

use janggi_core::{
    EndReason, Game, GameState, Position, Rules, Side, all_legal_moves, choose_move,
};

fn pos(file: u8, rank: u8) -> Position {
    Position::new(file, rank)
}

fn game_from(fen: &str) -> Game {
    Game::from_state(GameState::from_fen(fen).unwrap())
}

/// Plays engine moves for both sides, passing when a side has no move, until
/// the game ends or `max_actions` run out.
fn play_out(game: &mut Game, depth: u8, max_actions: usize) {
    for _ in 0..max_actions {
        if game.state().is_over() {
            return;
        }
        match choose_move(game.state(), depth).unwrap() {
            Some(mv) => game.apply_move(mv.from, mv.to).unwrap(),
            None => game.apply_pass().unwrap(),
        };
    }
}

// =============================================================================
// Checkmate
// =============================================================================

#[test]
fn test_two_chariot_mate() {
    let mut game = game_from("3k5/8R/9/9/9/R8/9/9/4K4/9");
    let mv = choose_move(game.state(), 2).unwrap().unwrap();
    let result = game.apply_move(mv.from, mv.to).unwrap();

    let outcome = result.game_over.expect("mate ends the game");
    assert_eq!(outcome.reason, EndReason::Checkmate);
    assert_eq!(outcome.winner, Some(Side::First));
}

#[test]
fn test_checkmated_side_has_no_moves() {
    let state = GameState::from_fen("R2k5/8R/9/9/9/9/9/9/4K4/9 b").unwrap();
    assert!(state.is_checkmate(Side::Second));
    assert!(all_legal_moves(state.board(), Side::Second).is_empty());
}

// =============================================================================
// Stalemate
// =============================================================================

#[test]
fn test_stalemate_is_not_terminal() {
    let mut game = game_from("3k5/8R/9/9/9/4R4/9/9/4K4/ppppppppp");
    game.apply_move(pos(4, 8), pos(3, 8)).unwrap();
    assert!(game.state().is_stalemate(Side::Second));
    assert!(!game.state().is_over());

    let result = game.apply_pass().unwrap();
    assert_eq!(result.game_over, None);
    assert!(game.state().has_passed(Side::Second));
}

// =============================================================================
// Move limit
// =============================================================================

#[test]
fn test_move_limit_counts_passes() {
    let rules = Rules {
        move_limit: 3,
        ..Rules::default()
    };
    let mut game = Game::from_state(GameState::default().with_rules(rules));
    game.apply_move(pos(0, 6), pos(0, 5)).unwrap();
    game.apply_pass().unwrap();
    let result = game.apply_move(pos(2, 6), pos(2, 5)).unwrap();

    let outcome = result.game_over.expect("third action reaches the limit");
    assert_eq!(outcome.reason, EndReason::MoveLimit);
}

#[test]
fn test_self_play_terminates() {
    let rules = Rules {
        move_limit: 12,
        ..Rules::default()
    };
    let mut game = Game::from_state(GameState::default().with_rules(rules));
    // A capture or check on the limit defers adjudication, so allow slack.
    play_out(&mut game, 1, 60);
    assert!(game.state().is_over());
}

// =============================================================================
// Double pass
// =============================================================================

#[test]
fn test_double_pass_draw_with_zero_komi() {
    let rules = Rules {
        komi: 0.0,
        ..Rules::default()
    };
    let mut game = Game::from_state(GameState::default().with_rules(rules));
    game.apply_pass().unwrap();
    let outcome = game.apply_pass().unwrap().game_over.unwrap();
    assert_eq!(outcome.reason, EndReason::DoublePass);
    assert_eq!(outcome.winner, None);
}

#[test]
fn test_komi_decides_equal_material() {
    let mut game = Game::default();
    game.apply_pass().unwrap();
    let outcome = game.apply_pass().unwrap().game_over.unwrap();
    assert_eq!(outcome.winner, Some(Side::Second));
    assert_eq!(game.state().adjudicated_scores(), (72.0, 73.5));
}

// =============================================================================
// Low material
// =============================================================================

#[test]
fn test_low_material_threshold_is_inclusive() {
    // First holds exactly ten points.
    let mut game = game_from("r8/4k4/9/9/9/9/9/9/4K4/C2A5");
    let result = game.apply_pass().unwrap();
    assert_eq!(result.game_over.unwrap().reason, EndReason::LowMaterial);
}

#[test]
fn test_above_threshold_continues() {
    // Chariot alone is thirteen points on each side.
    let mut game = game_from("r8/4k4/9/9/9/9/9/9/4K4/R8");
    let result = game.apply_pass().unwrap();
    assert_eq!(result.game_over, None);
    assert_eq!(
        game.legal_moves(pos(0, 0)).map(|moves| moves.is_empty()),
        Ok(false)
    );
}
