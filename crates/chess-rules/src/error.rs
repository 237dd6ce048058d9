//! Error type for position operations.

use chess_core::{FenError, Piece, Square};
use thiserror::Error;

/// Errors reported by [`Position`](crate::Position).
///
/// Every operation that returns one of these has left the position exactly as
/// it found it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("no moves to undo")]
    EmptyHistory,

    #[error("no piece on {0}")]
    NoPieceAt(Square),

    #[error("{piece} on {square} does not belong to the side to move")]
    WrongSide { square: Square, piece: Piece },

    #[error("move expects {expected} on {square}, found {found}")]
    PieceMismatch {
        square: Square,
        expected: Piece,
        found: Piece,
    },

    #[error("move records capture {expected:?} on {square}, board has {found:?}")]
    CaptureMismatch {
        square: Square,
        expected: Option<Piece>,
        found: Option<Piece>,
    },

    #[error("castling rook missing from {0}")]
    MissingCastlingRook(Square),

    #[error("invalid promotion on {0}")]
    InvalidPromotion(Square),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("invalid FEN: {0}")]
    Fen(#[from] FenError),
}
