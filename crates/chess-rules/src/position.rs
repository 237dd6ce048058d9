//! Game state: board, side to move, castling rights and move history.

use crate::movegen::{self, MoveList};
use crate::{Board, PositionError};
use chess_core::{
    CastlingRights, Color, CoordinateMove, Fen, FenError, Move, Piece, PriorState, Square,
};
use std::fmt;
use tracing::{debug, warn};

/// A chess position together with the moves that led to it.
///
/// The history is an undo stack: every applied move is pushed, and
/// [`undo_move`](Position::undo_move) pops the most recent one and restores
/// the state it recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) history: Vec<Move>,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Position {
            board: Board::standard(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Fen::parse(fen).map(Position::from)
    }

    /// Replaces this position with the one described by `fen`, clearing the
    /// history. On error the position is left as it was.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        match Position::from_fen(fen) {
            Ok(position) => {
                debug!(fen, "position loaded");
                *self = position;
                Ok(())
            }
            Err(e) => {
                warn!(fen, error = %e, "rejected FEN");
                Err(e)
            }
        }
    }

    /// Builds a position from an optional FEN (the start position if `None`)
    /// followed by moves in coordinate notation.
    pub fn setup<I, S>(fen: Option<&str>, moves: I) -> Result<Self, PositionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut position = match fen {
            Some(fen) => Position::from_fen(fen)?,
            None => Position::startpos(),
        };
        for text in moves {
            let m = position.find_move(text.as_ref())?;
            position.apply(m);
        }
        Ok(position)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.board.is_occupied(sq)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Moves applied so far, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The state a move made now would need to restore on undo.
    pub fn prior_state(&self) -> PriorState {
        PriorState {
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
        }
    }

    /// Pseudo-legal moves for the side to move.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        movegen::generate_moves(self)
    }

    /// Legal moves for the side to move.
    ///
    /// Takes `&mut self` because each candidate is made and taken back; the
    /// position is unchanged on return.
    pub fn legal_moves(&mut self) -> MoveList {
        movegen::generate_legal_moves(self)
    }

    /// Returns true if `m` is a pseudo-legal move here that does not leave the
    /// mover's king in check.
    pub fn is_move_legal(&mut self, m: &Move) -> bool {
        let candidate = Move {
            prior: self.prior_state(),
            ..*m
        };
        if !self.pseudo_legal_moves().as_slice().contains(&candidate) {
            return false;
        }
        let us = self.side_to_move;
        self.apply(candidate);
        let legal = !self.in_check(us);
        self.take_back();
        legal
    }

    /// Resolves coordinate text such as `e2e4` or `e7e8q` to a legal move.
    pub fn find_move(&mut self, text: &str) -> Result<Move, PositionError> {
        let coords =
            CoordinateMove::parse(text).ok_or_else(|| PositionError::IllegalMove(text.to_string()))?;
        self.legal_moves()
            .into_iter()
            .find(|m| coords.matches(m))
            .ok_or_else(|| PositionError::IllegalMove(text.to_string()))
    }

    /// Returns true if the king of `color` is attacked.
    pub fn in_check(&self, color: Color) -> bool {
        movegen::in_check(&self.board, color)
    }

    /// Returns true if any piece of `by_color` attacks `sq`.
    pub fn is_square_attacked(&self, sq: Square, by_color: Color) -> bool {
        movegen::is_square_attacked(&self.board, sq, by_color)
    }

    /// Returns the position as a six-field FEN string.
    pub fn to_fen(&self) -> String {
        Fen {
            board: *self.board.cells(),
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_string()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl From<Fen> for Position {
    fn from(fen: Fen) -> Self {
        Position {
            board: Board::from_cells(fen.board),
            side_to_move: fen.side_to_move,
            castling: fen.castling,
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
            history: Vec::new(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f)?;
        writeln!(f, "Side to move: {}", self.side_to_move)?;
        writeln!(f, "Castling: {}", self.castling)?;
        match self.en_passant {
            Some(sq) => writeln!(f, "En passant: {}", sq)?,
            None => writeln!(f, "En passant: -")?,
        }
        write!(f, "Fen: {}", self.to_fen())
    }
}
