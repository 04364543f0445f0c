use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

pub const FILES: usize = 9;
pub const RANKS: usize = 10;

/// The two players. `First` (Cho) moves first and starts on ranks 6..=9;
/// `Second` (Han) starts on ranks 0..=3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
    /// Rank delta of a soldier's forward step.
    pub fn forward(self) -> i8 {
        match self {
            Side::First => -1,
            Side::Second => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

impl FromStr for Side {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "cho" | "w" => Ok(Side::First),
            "second" | "han" | "b" => Ok(Side::Second),
            _ => Err(ParseError::Side(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    General,
    Guard,
    Chariot,
    Cannon,
    Horse,
    Elephant,
    Soldier,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Guard,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Horse,
        PieceKind::Elephant,
        PieceKind::Soldier,
    ];

    /// Material value. The General's 1000 only matters to the evaluator;
    /// adjudication counts it as nothing (see [`PieceKind::material`]).
    pub fn value(self) -> i32 {
        match self {
            PieceKind::General => 1000,
            PieceKind::Chariot => 13,
            PieceKind::Cannon => 7,
            PieceKind::Horse => 5,
            PieceKind::Elephant => 3,
            PieceKind::Guard => 3,
            PieceKind::Soldier => 2,
        }
    }

    /// Value used for low-material and end-of-game adjudication.
    pub fn material(self) -> u32 {
        match self {
            PieceKind::General => 0,
            other => other.value() as u32,
        }
    }

    /// Notation letter, upper case.
    pub fn letter(self) -> char {
        match self {
            PieceKind::General => 'K',
            PieceKind::Guard => 'A',
            PieceKind::Chariot => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Horse => 'N',
            PieceKind::Elephant => 'B',
            PieceKind::Soldier => 'P',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceKind::General),
            'A' => Some(PieceKind::Guard),
            'R' => Some(PieceKind::Chariot),
            'C' => Some(PieceKind::Cannon),
            'N' => Some(PieceKind::Horse),
            'B' => Some(PieceKind::Elephant),
            'P' => Some(PieceKind::Soldier),
            _ => None,
        }
    }
}

/// A board coordinate. Rank 0 is the Second side's back rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: u8,
    pub rank: u8,
}

impl Position {
    pub const fn new(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// Returns the position shifted by `(df, dr)`, or `None` off the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Position> {
        let f = self.file as i8 + df;
        let r = self.rank as i8 + dr;
        if (0..FILES as i8).contains(&f) && (0..RANKS as i8).contains(&r) {
            Some(Position::new(f as u8, r as u8))
        } else {
            None
        }
    }

    pub fn in_palace(self, side: Side) -> bool {
        if !(3..=5).contains(&self.file) {
            return false;
        }
        match side {
            Side::Second => self.rank <= 2,
            Side::First => (7..=9).contains(&self.rank),
        }
    }

    pub fn in_any_palace(self) -> bool {
        self.in_palace(Side::First) || self.in_palace(Side::Second)
    }

    pub fn is_palace_center(self) -> bool {
        self.file == 4 && (self.rank == 1 || self.rank == 8)
    }

    pub fn is_palace_corner(self) -> bool {
        (self.file == 3 || self.file == 5) && matches!(self.rank, 0 | 2 | 7 | 9)
    }

    /// Centre of the palace on this half of the board.
    pub fn palace_center(self) -> Position {
        if self.rank < 5 {
            Position::new(4, 1)
        } else {
            Position::new(4, 8)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank)
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.trim().as_bytes();
        if b.len() != 2 {
            return Err(ParseError::Coordinate(s.to_string()));
        }
        let f = b[0].to_ascii_lowercase();
        let r = b[1];
        if !(b'a'..=b'i').contains(&f) || !r.is_ascii_digit() {
            return Err(ParseError::Coordinate(s.to_string()));
        }
        Ok(Position::new(f - b'a', r - b'0'))
    }
}

/// A piece on the board. Its position is maintained by [`crate::Board`] only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub(crate) pos: Position,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Self {
            kind,
            side,
            pos: Position::default(),
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn letter(&self) -> char {
        match self.side {
            Side::First => self.kind.letter(),
            Side::Second => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return Err(ParseError::Move(s.to_string()));
        }
        let from = s[..2].parse().map_err(|_| ParseError::Move(s.to_string()))?;
        let to = s[2..].parse().map_err(|_| ParseError::Move(s.to_string()))?;
        Ok(Move::new(from, to))
    }
}

/// Opening arrangement of the Horse/Elephant pairs on files 1, 2, 6 and 7.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Formation {
    #[default]
    HorseElephantElephantHorse,
    HorseElephantHorseElephant,
    ElephantHorseHorseElephant,
    ElephantHorseElephantHorse,
}

impl Formation {
    pub const ALL: [Formation; 4] = [
        Formation::HorseElephantElephantHorse,
        Formation::HorseElephantHorseElephant,
        Formation::ElephantHorseHorseElephant,
        Formation::ElephantHorseElephantHorse,
    ];

    /// Pieces for files 1, 2, 6 and 7, in that order.
    pub fn pattern(self) -> [PieceKind; 4] {
        use PieceKind::{Elephant as E, Horse as H};
        match self {
            Formation::HorseElephantElephantHorse => [H, E, E, H],
            Formation::HorseElephantHorseElephant => [H, E, H, E],
            Formation::ElephantHorseHorseElephant => [E, H, H, E],
            Formation::ElephantHorseElephantHorse => [E, H, E, H],
        }
    }
}

impl TryFrom<u8> for Formation {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Formation::ALL
            .get(value as usize)
            .copied()
            .ok_or(ParseError::Formation(value))
    }
}

impl From<Formation> for u8 {
    fn from(f: Formation) -> u8 {
        match f {
            Formation::HorseElephantElephantHorse => 0,
            Formation::HorseElephantHorseElephant => 1,
            Formation::ElephantHorseHorseElephant => 2,
            Formation::ElephantHorseElephantHorse => 3,
        }
    }
}
