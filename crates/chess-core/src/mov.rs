//! Move representation.

use crate::{CastlingRights, Color, Piece, PieceKind, Square};
use std::fmt;

/// Position state from before a move, carried by the move so it can be
/// taken back without recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriorState {
    /// Castling rights before the move.
    pub castling: CastlingRights,
    /// En passant target square before the move.
    pub en_passant: Option<Square>,
    /// Halfmove clock before the move.
    pub halfmove_clock: u32,
}

impl PriorState {
    pub const INITIAL: PriorState = PriorState {
        castling: CastlingRights::ALL,
        en_passant: None,
        halfmove_clock: 0,
    };
}

/// A chess move.
///
/// Besides the squares, a move records the moving piece, what it captures,
/// what it promotes to, and whether it is castling or an en passant capture.
/// For an en passant capture `captured` is the pawn taken from behind `to`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
    pub is_castling: bool,
    pub is_en_passant: bool,
    pub prior: PriorState,
}

impl Move {
    /// Creates a quiet move (no capture, no special action).
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece, prior: PriorState) -> Self {
        Move {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            is_castling: false,
            is_en_passant: false,
            prior,
        }
    }

    /// Marks this move as capturing `captured`.
    #[inline]
    pub const fn with_capture(mut self, captured: Piece) -> Self {
        self.captured = Some(captured);
        self
    }

    /// Marks this move as promoting to `kind` of the mover's color.
    #[inline]
    pub const fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(Piece::new(kind, self.piece.color));
        self
    }

    /// Marks this move as castling.
    #[inline]
    pub const fn castling(mut self) -> Self {
        self.is_castling = true;
        self
    }

    /// Marks this move as an en passant capture of an enemy pawn.
    #[inline]
    pub const fn en_passant(mut self) -> Self {
        self.is_en_passant = true;
        self.captured = Some(Piece::new(PieceKind::Pawn, self.piece.color.opposite()));
        self
    }

    /// Returns true if the move captures anything.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    /// The color making the move.
    #[inline]
    pub const fn color(self) -> Color {
        self.piece.color
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(p) => format!("{}{}{}", self.from, self.to, p.kind.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {})", self.piece, self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// A move in coordinate notation as it arrives over the wire: two squares and
/// an optional promotion letter. It carries no board knowledge; the engine
/// resolves it against its generated moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl CoordinateMove {
    /// Parses "e2e4" or "e7e8q".
    pub fn parse(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2]).ok()?;
        let to = Square::from_algebraic(&s[2..4]).ok()?;
        let promotion = match s[4..].chars().next() {
            Some(c) => match PieceKind::from_char(c)? {
                PieceKind::Pawn | PieceKind::King => return None,
                kind => Some(kind),
            },
            None => None,
        };
        Some(CoordinateMove {
            from,
            to,
            promotion,
        })
    }

    /// Returns true if `m` goes between the same squares with the same promotion.
    pub fn matches(&self, m: &Move) -> bool {
        m.from == self.from && m.to == self.to && m.promotion.map(|p| p.kind) == self.promotion
    }
}

impl fmt::Display for CoordinateMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}
