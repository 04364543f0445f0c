use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::ParseError;
use crate::types::*;

/// A 9x10 grid of optional pieces.
///
/// Mutation is purely mechanical: nothing here checks the rules. Every method
/// that moves a piece updates both the grid cell and the piece's stored
/// position, so `get(p).map(Piece::position) == Some(p)` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; FILES]; RANKS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; FILES]; RANKS],
        }
    }

    /// Standard opening layout with the chosen formation for each side.
    pub fn startpos(first: Formation, second: Formation) -> Self {
        let mut b = Board::empty();
        b.setup_side(Side::Second, second);
        b.setup_side(Side::First, first);
        b
    }

    fn setup_side(&mut self, side: Side, formation: Formation) {
        let (back, palace, cannon, soldier) = match side {
            Side::Second => (0, 1, 2, 3),
            Side::First => (9, 8, 7, 6),
        };
        let mut put = |kind, file, rank| {
            self.place(Piece::new(kind, side), Position::new(file, rank));
        };

        put(PieceKind::General, 4, palace);
        put(PieceKind::Guard, 3, back);
        put(PieceKind::Guard, 5, back);
        put(PieceKind::Chariot, 0, back);
        put(PieceKind::Chariot, 8, back);
        for (file, kind) in [1, 2, 6, 7].into_iter().zip(formation.pattern()) {
            put(kind, file, back);
        }
        put(PieceKind::Cannon, 1, cannon);
        put(PieceKind::Cannon, 7, cannon);
        for file in (0..FILES as u8).step_by(2) {
            put(PieceKind::Soldier, file, soldier);
        }
    }

    /// Parses the placement part of the board notation: ten ranks separated
    /// by `/`, rank 0 first, digits for runs of empty cells, upper case for
    /// the First side.
    pub fn from_fen(fen: &str) -> Result<Self, ParseError> {
        let placement = fen.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != RANKS {
            return Err(ParseError::Board(format!(
                "expected {RANKS} ranks, found {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        for (rank, row) in ranks.iter().enumerate() {
            let mut file = 0usize;
            for ch in row.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as usize;
                } else {
                    let kind = PieceKind::from_letter(ch)
                        .ok_or_else(|| ParseError::Board(format!("unknown piece `{ch}`")))?;
                    let side = if ch.is_ascii_uppercase() {
                        Side::First
                    } else {
                        Side::Second
                    };
                    if file >= FILES {
                        return Err(ParseError::Board(format!("rank {rank} is too long")));
                    }
                    board.place(Piece::new(kind, side), Position::new(file as u8, rank as u8));
                    file += 1;
                }
            }
            if file != FILES {
                return Err(ParseError::Board(format!(
                    "rank {rank} covers {file} files, expected {FILES}"
                )));
            }
        }
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in 0..RANKS {
            if rank > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for file in 0..FILES {
                match self.cells[rank][file] {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.letter());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        out
    }

    pub fn get(&self, pos: Position) -> Option<&Piece> {
        self.cells
            .get(pos.rank as usize)
            .and_then(|row| row.get(pos.file as usize))
            .and_then(Option::as_ref)
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Puts `piece` on `pos`, replacing whatever was there.
    pub fn place(&mut self, mut piece: Piece, pos: Position) {
        piece.pos = pos;
        self.cells[pos.rank as usize][pos.file as usize] = Some(piece);
    }

    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.cells[pos.rank as usize][pos.file as usize].take()
    }

    /// Moves the piece on `from` to `to` and returns the piece that stood on
    /// `to`, if any. Does nothing when `from` is empty.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.remove(from)?;
        let captured = self.remove(to);
        self.place(piece, to);
        captured
    }

    /// Exact inverse of [`Board::move_piece`].
    pub fn unmove_piece(&mut self, mv: Move, captured: Option<Piece>) {
        if let Some(piece) = self.remove(mv.to) {
            self.place(piece, mv.from);
        }
        if let Some(pc) = captured {
            self.place(pc, mv.to);
        }
    }

    /// Plays `mv` and returns a guard that undoes it when dropped, including
    /// during unwinding. The guard derefs to the board in its moved state.
    pub fn apply(&mut self, mv: Move) -> AppliedMove<'_> {
        let captured = self.move_piece(mv.from, mv.to);
        AppliedMove {
            board: self,
            mv,
            captured,
        }
    }

    /// All pieces in scan order: rank by rank, file by file.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten().flatten()
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |pc| pc.side == side)
    }

    pub fn general(&self, side: Side) -> Option<Position> {
        self.pieces_of(side)
            .find(|pc| pc.kind == PieceKind::General)
            .map(Piece::position)
    }

    /// Sum of adjudication values for `side`; the General counts as zero.
    pub fn material(&self, side: Side) -> u32 {
        self.pieces_of(side).map(|pc| pc.kind.material()).sum()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..RANKS {
            write!(f, "{rank} ")?;
            for file in 0..FILES {
                let c = self.cells[rank][file].map(|pc| pc.letter()).unwrap_or('.');
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for file in 0..FILES as u8 {
            write!(f, " {}", (b'a' + file) as char)?;
        }
        writeln!(f)
    }
}

/// A move held on the board for as long as the guard lives.
pub struct AppliedMove<'a> {
    board: &'a mut Board,
    mv: Move,
    captured: Option<Piece>,
}

impl AppliedMove<'_> {
    pub fn captured(&self) -> Option<&Piece> {
        self.captured.as_ref()
    }
}

impl Deref for AppliedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for AppliedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for AppliedMove<'_> {
    fn drop(&mut self) {
        self.board.unmove_piece(self.mv, self.captured.take());
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
