//! Castling geometry: home squares and the squares a castle passes over.

use chess_core::{CastlingRights, Color, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    pub(crate) const BOTH: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// Which side a king move from its home square to `to` castles on.
    pub(crate) fn from_king_target(to: Square) -> Option<CastleSide> {
        match to.file() {
            6 => Some(CastleSide::King),
            2 => Some(CastleSide::Queen),
            _ => None,
        }
    }

    pub(crate) const fn has_right(self, rights: CastlingRights, color: Color) -> bool {
        match self {
            CastleSide::King => rights.kingside(color),
            CastleSide::Queen => rights.queenside(color),
        }
    }

    pub(crate) const fn king_target(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::King, Color::White) => Square::G1,
            (CastleSide::Queen, Color::White) => Square::C1,
            (CastleSide::King, Color::Black) => Square::G8,
            (CastleSide::Queen, Color::Black) => Square::C8,
        }
    }

    /// The rook's home corner and where it lands.
    pub(crate) const fn rook_squares(self, color: Color) -> (Square, Square) {
        match (self, color) {
            (CastleSide::King, Color::White) => (Square::H1, Square::F1),
            (CastleSide::Queen, Color::White) => (Square::A1, Square::D1),
            (CastleSide::King, Color::Black) => (Square::H8, Square::F8),
            (CastleSide::Queen, Color::Black) => (Square::A8, Square::D8),
        }
    }

    /// Squares between king and rook; all must be empty.
    pub(crate) const fn between(self, color: Color) -> &'static [Square] {
        match (self, color) {
            (CastleSide::King, Color::White) => &[Square::F1, Square::G1],
            (CastleSide::Queen, Color::White) => &[Square::B1, Square::C1, Square::D1],
            (CastleSide::King, Color::Black) => &[Square::F8, Square::G8],
            (CastleSide::Queen, Color::Black) => &[Square::B8, Square::C8, Square::D8],
        }
    }

    /// The square the king crosses on its way to the target.
    pub(crate) const fn pass_through(self, color: Color) -> Square {
        self.rook_squares(color).1
    }
}

pub(crate) const fn king_home(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}
