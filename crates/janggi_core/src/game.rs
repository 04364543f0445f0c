//! Turn order, passes, end-of-game adjudication and undo history.
//!
//! [`GameState`] is a plain value: the board, whose turn it is, and the
//! counters and flags the end triggers look at. [`Game`] owns the current
//! state plus a stack of full snapshots, one per accepted move or pass, so
//! undo restores everything rather than just the board.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    attacks::is_in_check,
    board::Board,
    error::{GameError, ParseError},
    movegen::{has_legal_move, legal_moves},
    rules::Rules,
    search,
    types::*,
};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// The side to move is in check with no legal move, or lost its General.
    Checkmate,
    MoveLimit,
    DoublePass,
    LowMaterial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    /// `None` is a draw.
    pub winner: Option<Side>,
    pub reason: EndReason,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    GameOver(Outcome),
}

/// What an accepted move or pass did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveResult {
    pub captured: Option<PieceKind>,
    pub game_over: Option<Outcome>,
    /// The side now to move is in check.
    pub check: bool,
    pub side_to_move: Side,
    /// The side now to move has no legal move and is not in check; it can
    /// only pass.
    pub stalemate: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    board: Board,
    side_to_move: Side,
    move_count: u32,
    passed: [bool; 2],
    status: GameStatus,
    last_capture: bool,
    last_check: bool,
    rules: Rules,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Formation::default(), Formation::default())
    }
}

impl GameState {
    pub fn new(first: Formation, second: Formation) -> Self {
        Self::from_board(Board::startpos(first, second), Side::First)
    }

    pub fn from_board(board: Board, side_to_move: Side) -> Self {
        Self {
            board,
            side_to_move,
            move_count: 0,
            passed: [false; 2],
            status: GameStatus::InProgress,
            last_capture: false,
            last_check: false,
            rules: Rules::default(),
        }
    }

    /// Board notation followed by an optional `w` (First) or `b` (Second)
    /// side-to-move field.
    pub fn from_fen(fen: &str) -> Result<Self, ParseError> {
        let board = Board::from_fen(fen)?;
        let side = match fen.split_whitespace().nth(1) {
            Some(token) => token.parse()?,
            None => Side::First,
        };
        Ok(Self::from_board(board, side))
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }
    pub fn move_count(&self) -> u32 {
        self.move_count
    }
    pub fn has_passed(&self, side: Side) -> bool {
        self.passed[side.idx()]
    }
    pub fn status(&self) -> GameStatus {
        self.status
    }
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    pub fn last_move_was_capture(&self) -> bool {
        self.last_capture
    }
    pub fn last_move_was_check(&self) -> bool {
        self.last_check
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::GameOver(outcome) => Some(outcome),
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Raw material totals `(first, second)`, Generals excluded.
    pub fn material_scores(&self) -> (u32, u32) {
        (
            self.board.material(Side::First),
            self.board.material(Side::Second),
        )
    }

    /// Totals as adjudicated, with komi added to the Second side.
    pub fn adjudicated_scores(&self) -> (f64, f64) {
        self.rules.scores(&self.board)
    }

    pub fn in_check(&self, side: Side) -> bool {
        is_in_check(&self.board, side)
    }

    pub fn is_checkmate(&self, side: Side) -> bool {
        self.in_check(side) && !has_legal_move(&mut self.board.clone(), side)
    }

    pub fn is_stalemate(&self, side: Side) -> bool {
        !self.in_check(side) && !has_legal_move(&mut self.board.clone(), side)
    }

    /// Legal moves of the piece on `pos`, which must belong to the side to move.
    pub fn legal_moves_from(&self, pos: Position) -> Result<Vec<Move>, GameError> {
        let piece = self
            .board
            .get(pos)
            .filter(|pc| pc.side == self.side_to_move)
            .ok_or(GameError::InvalidSelection(pos))?;
        Ok(legal_moves(&self.board, piece))
    }

    /// Adjudicates by material if the move limit, a double pass or low
    /// material applies. Deferred while the last action was a capture or gave
    /// check.
    pub fn check_end_triggers(&mut self) -> Option<Outcome> {
        if let GameStatus::GameOver(outcome) = self.status {
            return Some(outcome);
        }
        if self.last_capture || self.last_check {
            return None;
        }

        let reason = if self.move_count >= self.rules.move_limit {
            EndReason::MoveLimit
        } else if self.passed.iter().all(|&p| p) {
            EndReason::DoublePass
        } else if self.rules.is_low_material(&self.board) {
            EndReason::LowMaterial
        } else {
            return None;
        };

        let outcome = Outcome {
            winner: self.rules.material_winner(&self.board),
            reason,
        };
        let (first, second) = self.adjudicated_scores();
        debug!(first, second, "material adjudication");
        self.finish(outcome);
        Some(outcome)
    }

    /// Plays a move already known to be legal.
    fn play(&mut self, mv: Move) -> MoveResult {
        let mover = self.side_to_move;
        let captured = self.board.move_piece(mv.from, mv.to);
        let captured_kind = captured.map(|pc| pc.kind);

        self.last_capture = captured.is_some();
        self.move_count += 1;
        self.passed = [false; 2];
        let took_general = captured_kind == Some(PieceKind::General);
        // With the General gone there is nothing left to check.
        self.last_check = !took_general && is_in_check(&self.board, mover.other());
        self.side_to_move = mover.other();
        debug!(side = %mover, mv = %mv, captured = ?captured_kind, check = self.last_check, "move");

        if took_general {
            self.finish(Outcome {
                winner: Some(mover),
                reason: EndReason::Checkmate,
            });
        } else if self.check_end_triggers().is_none() {
            self.check_checkmate();
        }
        self.result(captured_kind)
    }

    fn pass(&mut self) -> MoveResult {
        let side = self.side_to_move;
        self.passed[side.idx()] = true;
        self.move_count += 1;
        self.last_capture = false;
        self.last_check = false;
        self.side_to_move = side.other();
        debug!(side = %side, move_count = self.move_count, "pass");

        if self.check_end_triggers().is_none() {
            self.check_checkmate();
        }
        self.result(None)
    }

    fn check_checkmate(&mut self) {
        let side = self.side_to_move;
        if self.is_checkmate(side) {
            self.finish(Outcome {
                winner: Some(side.other()),
                reason: EndReason::Checkmate,
            });
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(winner = ?outcome.winner, reason = ?outcome.reason, moves = self.move_count, "game over");
        self.status = GameStatus::GameOver(outcome);
    }

    fn result(&self, captured: Option<PieceKind>) -> MoveResult {
        let game_over = self.outcome();
        MoveResult {
            captured,
            game_over,
            check: self.last_check,
            side_to_move: self.side_to_move,
            stalemate: game_over.is_none() && self.is_stalemate(self.side_to_move),
        }
    }
}

/// A game in progress together with its undo history.
#[derive(Clone, Debug, Default)]
pub struct Game {
    state: GameState,
    history: Vec<GameState>,
}

impl Game {
    pub fn new(first: Formation, second: Formation) -> Self {
        Self::from_state(GameState::new(first, second))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Number of actions that can be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Destinations for the piece on `pos`, for move hints.
    pub fn legal_moves(&self, pos: Position) -> Result<Vec<Position>, GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        let moves = self.state.legal_moves_from(pos)?;
        Ok(moves.into_iter().map(|mv| mv.to).collect())
    }

    pub fn apply_move(&mut self, from: Position, to: Position) -> Result<MoveResult, GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        let mv = Move::new(from, to);
        if !self.state.legal_moves_from(from)?.contains(&mv) {
            return Err(GameError::IllegalMove(mv));
        }
        self.history.push(self.state.clone());
        Ok(self.state.play(mv))
    }

    /// The side to move passes. Always available while the game is running.
    pub fn apply_pass(&mut self) -> Result<MoveResult, GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        self.history.push(self.state.clone());
        Ok(self.state.pass())
    }

    /// Restores the snapshot taken before the last move or pass.
    pub fn undo_last(&mut self) -> Result<&GameState, GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        let prev = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.state = prev;
        debug!(move_count = self.state.move_count, "undo");
        Ok(&self.state)
    }

    /// Takes back the opponent's reply and the mover's own last action, or
    /// a single action when only one is recorded.
    pub fn undo_turn(&mut self) -> Result<&GameState, GameError> {
        self.undo_last()?;
        if !self.history.is_empty() {
            self.undo_last()?;
        }
        Ok(&self.state)
    }

    /// Best move for the side to move at the given search depth.
    pub fn ai_choose_move(&self, depth: u8) -> Result<Option<Move>, GameError> {
        search::choose_move(&self.state, depth)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
