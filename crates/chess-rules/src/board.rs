//! Piece placement.

use chess_core::{Color, Piece, PieceKind, Square};
use std::fmt;

/// Back rank layout from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of optional pieces, indexed by `rank * 8 + file`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces.
    pub const fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    /// The standard starting setup.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::BOTH {
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                board.cells[color.back_rank() as usize * 8 + file] = Some(Piece::new(kind, color));
                board.cells[color.pawn_rank() as usize * 8 + file] =
                    Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Builds a board from cells laid out a1 first.
    pub const fn from_cells(cells: [Option<Piece>; 64]) -> Self {
        Board { cells }
    }

    /// The raw cells, a1 first.
    pub const fn cells(&self) -> &[Option<Piece>; 64] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_some()
    }

    /// Returns true if `sq` holds a piece of `color`.
    #[inline]
    pub fn is_color(&self, sq: Square, color: Color) -> bool {
        matches!(self.cells[sq.index()], Some(p) if p.color == color)
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index()] = piece;
    }

    /// Removes and returns whatever stands on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].take()
    }

    /// Iterates over occupied squares and their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Finds the king of `color`. Well-formed positions have exactly one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        Square::all().find(|&sq| self.get(sq) == Some(king))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Prints rank 8 at the top, `.` for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.cells[rank * 8 + file] {
                    Some(p) => write!(f, " {}", p.to_fen_char())?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "\n   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board")?;
        write!(f, "{}", self)
    }
}
