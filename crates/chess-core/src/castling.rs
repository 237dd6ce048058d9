//! Castling rights.

use crate::Color;
use std::fmt;

/// The four castling flags.
///
/// Over a game the flags only ever go from `true` to `false`; the one way back
/// is taking a move back, which restores the snapshot stored in the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    /// Returns true if the given side may still castle kingside.
    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    /// Returns true if the given side may still castle queenside.
    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    /// Removes both rights of a color.
    #[inline]
    pub fn revoke_all(&mut self, color: Color) {
        self.revoke_kingside(color);
        self.revoke_queenside(color);
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn revoke_kingside(&mut self, color: Color) {
        match color {
            Color::White => self.white_kingside = false,
            Color::Black => self.black_kingside = false,
        }
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn revoke_queenside(&mut self, color: Color) {
        match color {
            Color::White => self.white_queenside = false,
            Color::Black => self.black_queenside = false,
        }
    }

    /// Returns true if no right is left.
    #[inline]
    pub const fn is_empty(self) -> bool {
        !(self.white_kingside || self.white_queenside || self.black_kingside || self.black_queenside)
    }
}

/// Formats as the FEN castling field ("KQkq", "Kq", "-").
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let flags = [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ];
        for (set, c) in flags {
            if set {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
