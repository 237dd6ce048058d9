//! Board square representation.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when constructing or parsing a square.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid square: rank {rank}, file {file}")]
    OutOfRange { rank: i16, file: i16 },

    #[error("invalid square text: '{0}'")]
    InvalidText(String),
}

/// A square on the chess board: a (rank, file) pair, each in `0..8`.
///
/// Stored as `rank * 8 + file`, so a1 = 0, b1 = 1, ..., h8 = 63.
/// Rank 0 is White's first rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from rank and file, failing when either is out of range.
    #[inline]
    pub const fn new(rank: u8, file: u8) -> Result<Self, SquareError> {
        if rank < 8 && file < 8 {
            Ok(Square(rank * 8 + file))
        } else {
            Err(SquareError::OutOfRange {
                rank: rank as i16,
                file: file as i16,
            })
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Iterates over all 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, SquareError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError::InvalidText(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file >= 8 || rank >= 8 {
            return Err(SquareError::InvalidText(s.to_string()));
        }
        Ok(Square(rank * 8 + file))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the rank (0-7).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Returns the file (0-7).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square `dr` ranks and `df` files away, if it is on the board.
    #[inline]
    pub const fn offset(self, dr: i8, df: i8) -> Option<Square> {
        let rank = self.rank() as i8 + dr;
        let file = self.file() as i8 + df;
        if rank >= 0 && rank < 8 && file >= 0 && file < 8 {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
