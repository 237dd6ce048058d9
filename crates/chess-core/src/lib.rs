//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and the
//! protocol front end:
//! - [`Color`], [`PieceKind`] and [`Piece`] for piece representation
//! - [`Square`] for board coordinates
//! - [`CastlingRights`] for the four castling flags
//! - [`Move`] with the state snapshot needed to take it back
//! - FEN parsing and serialization ([`Fen`])

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{CoordinateMove, Move, PriorState};
pub use piece::{Piece, PieceKind};
pub use square::{Square, SquareError};
