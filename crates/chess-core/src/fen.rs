//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{CastlingRights, Color, Piece, Square};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 to 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: expected 8 ranks, got {0}")]
    InvalidRankCount(usize),

    #[error("invalid piece placement: rank {rank} has {squares} squares, expected 8")]
    InvalidRankLength { rank: u8, squares: u32 },

    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights character '{0}'")]
    InvalidCastlingRights(char),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A fully parsed FEN record.
///
/// Parsing either produces a complete record or an error; nothing is
/// half-built, so callers can swap their state in only on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Board cells indexed by `rank * 8 + file`, a1 first.
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    ///
    /// The board, side, castling and en passant fields are required; the two
    /// clocks may be omitted and then default to `0 1`.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::InvalidFieldCount(parts.len()));
        }

        let board = Self::parse_piece_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(parts[2])?;
        let en_passant = Self::parse_en_passant(parts[3])?;

        let halfmove_clock = match parts.get(4) {
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(s.to_string()))?,
            None => 0,
        };

        let fullmove_number = match parts.get(5) {
            Some(s) => s
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| FenError::InvalidFullmoveNumber(s.to_string()))?,
            None => 1,
        };

        Ok(Fen {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_piece_placement(placement: &str) -> Result<[Option<Piece>; 64], FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRankCount(ranks.len()));
        }

        let mut board = [None; 64];
        for (i, text) in ranks.iter().enumerate() {
            // FEN lists rank 8 first
            let rank = 7 - i as u8;
            let mut squares = 0u32;
            for c in text.chars() {
                if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    squares += run;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece(c))?;
                    if squares < 8 {
                        board[rank as usize * 8 + squares as usize] = Some(piece);
                    }
                    squares += 1;
                }
            }
            if squares != 8 {
                return Err(FenError::InvalidRankLength {
                    rank: rank + 1,
                    squares,
                });
            }
        }

        Ok(board)
    }

    fn parse_castling(castling: &str) -> Result<CastlingRights, FenError> {
        let mut rights = CastlingRights::NONE;
        if castling == "-" {
            return Ok(rights);
        }

        for c in castling.chars() {
            match c {
                'K' => rights.white_kingside = true,
                'Q' => rights.white_queenside = true,
                'k' => rights.black_kingside = true,
                'q' => rights.black_queenside = true,
                other => return Err(FenError::InvalidCastlingRights(other)),
            }
        }

        Ok(rights)
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        let square = Square::from_algebraic(ep)
            .map_err(|_| FenError::InvalidEnPassantSquare(ep.to_string()))?;
        // Only a square a pawn just skipped over can be a target
        if square.rank() != 2 && square.rank() != 5 {
            return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
        }

        Ok(Some(square))
    }
}

impl Default for Fen {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

/// Serializes back to a six-field FEN string.
impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.to_fen_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        let ep = self
            .en_passant
            .map(|sq| sq.to_algebraic())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            " {} {} {} {} {}",
            self.side_to_move.fen_char(),
            self.castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;
    use proptest::prelude::*;

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.castling, CastlingRights::ALL);
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(
            fen.board[Square::E1.index()],
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            fen.board[Square::D8.index()],
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(fen.board.iter().filter(|c| c.is_some()).count(), 32);
    }

    #[test]
    fn parse_custom_position() {
        let fen =
            Fen::parse("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
        assert_eq!(fen.halfmove_clock, 2);
        assert_eq!(fen.fullmove_number, 3);
        let f3 = Square::from_algebraic("f3").unwrap();
        assert_eq!(fen.board[f3.index()], Some(Piece::new(PieceKind::Knight, Color::White)));
    }

    #[test]
    fn clocks_are_optional() {
        let fen = Fen::parse("8/8/8/8/8/8/8/K6k b - -").unwrap();
        assert_eq!(fen.side_to_move, Color::Black);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
    }

    #[test]
    fn roundtrip() {
        let original = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let parsed = Fen::parse(original).unwrap();
        assert_eq!(parsed.to_string(), original);
        assert_eq!(Fen::default().to_string(), Fen::STARTPOS);
    }

    #[test]
    fn wrong_field_count() {
        assert_eq!(Fen::parse("invalid"), Err(FenError::InvalidFieldCount(1)));
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 1 extra"),
            Err(FenError::InvalidFieldCount(7))
        );
    }

    #[test]
    fn wrong_rank_count() {
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidRankCount(7))
        );
    }

    #[test]
    fn wrong_rank_length() {
        assert_eq!(
            Fen::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidRankLength {
                rank: 8,
                squares: 9
            })
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/7/8 w - - 0 1"),
            Err(FenError::InvalidRankLength {
                rank: 2,
                squares: 7
            })
        );
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/88/8 w - - 0 1"),
            Err(FenError::InvalidRankLength { .. })
        ));
    }

    #[test]
    fn invalid_piece_letter() {
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiece('X'))
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/09 w - - 0 1"),
            Err(FenError::InvalidPiece('0'))
        );
    }

    #[test]
    fn invalid_active_color() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_castling_letter() {
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/8 w KX - 0 1"),
            Err(FenError::InvalidCastlingRights('X'))
        );
    }

    #[test]
    fn invalid_en_passant_square() {
        for ep in ["abc", "x3", "e4", "e9"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - {} 0 1", ep);
            assert_eq!(
                Fen::parse(&fen),
                Err(FenError::InvalidEnPassantSquare(ep.to_string()))
            );
        }
    }

    #[test]
    fn invalid_clocks() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 0"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidFieldCount(3);
        assert!(err.to_string().contains('3'));

        let err = FenError::InvalidPiece('z');
        assert!(err.to_string().contains('z'));

        let err = FenError::InvalidRankLength { rank: 4, squares: 9 };
        assert_eq!(
            err.to_string(),
            "invalid piece placement: rank 4 has 9 squares, expected 8"
        );
    }

    proptest! {
        #[test]
        fn parse_never_panics(s in "[pnbrqkPNBRQK1-9/ wb\\-a-h]{0,60}") {
            let _ = Fen::parse(&s);
        }
    }
}
