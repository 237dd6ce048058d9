//! Mailbox chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - an 8x8 grid of optional pieces
//! - [`Position`] - board plus side to move, castling rights, en passant
//!   target, clocks and the move history used as an undo stack
//! - Attack geometry and pseudo-legal move generation ([`movegen`])
//! - Make/undo with exact state restoration
//! - Check detection and perft
//!
//! # Example
//!
//! ```
//! use chess_rules::{perft, Position};
//!
//! let mut position = Position::startpos();
//! let e4 = position.find_move("e2e4").unwrap();
//! position.make_move(e4).unwrap();
//! assert_eq!(position.legal_moves().len(), 20);
//!
//! position.undo_move().unwrap();
//! assert_eq!(perft(&mut position, 2), 400);
//! ```

mod board;
mod castling;
mod error;
pub mod movegen;
mod mutate;
mod position;
mod square_set;

pub use board::Board;
pub use error::PositionError;
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    attacks_from, bishop_attacks, generate_legal_moves, generate_moves, in_check,
    is_square_attacked, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
    MoveList,
};
pub use position::Position;
pub use square_set::SquareSet;
