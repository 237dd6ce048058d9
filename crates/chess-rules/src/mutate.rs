//! Making and taking back moves.

use crate::castling::{king_home, CastleSide};
use crate::{Position, PositionError};
use chess_core::{CastlingRights, Color, Move, PieceKind, Square};

impl Position {
    /// Applies `m` after checking it against the board.
    ///
    /// The move's undo snapshot is taken from the current state, so moves
    /// built by hand need not fill it in. Validation covers the pieces the
    /// move names plus the castling and en passant preconditions, not
    /// geometry; use [`is_move_legal`](Position::is_move_legal) for full
    /// legality. On error nothing is changed.
    pub fn make_move(&mut self, m: Move) -> Result<(), PositionError> {
        self.validate(&m)?;
        let m = Move {
            prior: self.prior_state(),
            ..m
        };
        self.apply(m);
        Ok(())
    }

    /// Takes back the most recent move and returns it.
    pub fn undo_move(&mut self) -> Result<Move, PositionError> {
        self.take_back().ok_or(PositionError::EmptyHistory)
    }

    fn validate(&self, m: &Move) -> Result<(), PositionError> {
        let us = self.side_to_move;
        let piece = self
            .board
            .get(m.from)
            .ok_or(PositionError::NoPieceAt(m.from))?;
        if piece.color != us {
            return Err(PositionError::WrongSide {
                square: m.from,
                piece,
            });
        }
        if piece != m.piece {
            return Err(PositionError::PieceMismatch {
                square: m.from,
                expected: m.piece,
                found: piece,
            });
        }

        if m.is_en_passant {
            let victim_sq = en_passant_victim(m);
            let found = victim_sq.and_then(|sq| self.board.get(sq));
            let enemy_pawn = matches!(found, Some(p) if p.kind == PieceKind::Pawn && p.color != us);
            if piece.kind != PieceKind::Pawn
                || self.en_passant != Some(m.to)
                || self.board.is_occupied(m.to)
                || !enemy_pawn
                || found != m.captured
            {
                return Err(PositionError::CaptureMismatch {
                    square: victim_sq.unwrap_or(m.to),
                    expected: m.captured,
                    found,
                });
            }
        } else {
            let found = self.board.get(m.to);
            if found != m.captured || found.is_some_and(|p| p.color == us) {
                return Err(PositionError::CaptureMismatch {
                    square: m.to,
                    expected: m.captured,
                    found,
                });
            }
        }

        if m.is_castling {
            let side = CastleSide::from_king_target(m.to)
                .filter(|_| piece.kind == PieceKind::King && m.from == king_home(us))
                .filter(|side| side.has_right(self.castling, us))
                .ok_or_else(|| PositionError::IllegalMove(m.to_uci()))?;
            let (corner, _) = side.rook_squares(us);
            if !matches!(self.board.get(corner), Some(p) if p.kind == PieceKind::Rook && p.color == us)
            {
                return Err(PositionError::MissingCastlingRook(corner));
            }
            if side.between(us).iter().any(|&sq| self.board.is_occupied(sq)) {
                return Err(PositionError::IllegalMove(m.to_uci()));
            }
        }

        let reaches_last_rank =
            piece.kind == PieceKind::Pawn && m.to.rank() == us.promotion_rank();
        match m.promotion {
            Some(p) if reaches_last_rank
                && p.color == us
                && PieceKind::PROMOTIONS.contains(&p.kind) => {}
            None if !reaches_last_rank => {}
            _ => return Err(PositionError::InvalidPromotion(m.to)),
        }

        Ok(())
    }

    /// Applies `m` without validation. `m.prior` must describe the current
    /// state for [`take_back`](Position::take_back) to restore it.
    pub(crate) fn apply(&mut self, m: Move) {
        let us = m.color();

        self.board.set(m.from, None);
        self.board.set(m.to, Some(m.piece));

        self.history.push(m);
        self.side_to_move = us.opposite();

        if m.is_castling {
            if let Some(side) = CastleSide::from_king_target(m.to) {
                let (corner, landing) = side.rook_squares(us);
                let rook = self.board.take(corner);
                self.board.set(landing, rook);
            }
        }

        if let Some(promoted) = m.promotion {
            self.board.set(m.to, Some(promoted));
        }

        if m.is_en_passant {
            if let Some(sq) = en_passant_victim(&m) {
                self.board.set(sq, None);
            }
        }

        self.update_castling_rights(&m);

        let is_pawn = m.piece.kind == PieceKind::Pawn;
        self.en_passant = if is_pawn && m.from.rank().abs_diff(m.to.rank()) == 2 {
            m.from.offset(us.pawn_direction(), 0)
        } else {
            None
        };
        self.halfmove_clock = if is_pawn || m.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };
        if us == Color::Black {
            self.fullmove_number += 1;
        }
    }

    /// Pops the last move and restores the state before it.
    pub(crate) fn take_back(&mut self) -> Option<Move> {
        let m = self.history.pop()?;
        let us = m.color();

        // `m.piece` is the pawn for promotions, so this also undoes them
        self.board.set(m.from, Some(m.piece));
        if m.is_en_passant {
            self.board.set(m.to, None);
            if let Some(sq) = en_passant_victim(&m) {
                self.board.set(sq, m.captured);
            }
        } else {
            self.board.set(m.to, m.captured);
        }

        if m.is_castling {
            if let Some(side) = CastleSide::from_king_target(m.to) {
                let (corner, landing) = side.rook_squares(us);
                let rook = self.board.take(landing);
                self.board.set(corner, rook);
            }
        }

        self.castling = m.prior.castling;
        self.en_passant = m.prior.en_passant;
        self.halfmove_clock = m.prior.halfmove_clock;
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_sub(1);
        }
        self.side_to_move = us;
        Some(m)
    }

    /// Revokes rights lost by `m`: all of the mover's when its king moves, one
    /// when a rook leaves its corner, and the opponent's when a capture lands
    /// on one of its rook corners.
    fn update_castling_rights(&mut self, m: &Move) {
        let us = m.color();
        match m.piece.kind {
            PieceKind::King => self.castling.revoke_all(us),
            PieceKind::Rook => revoke_for_corner(&mut self.castling, us, m.from),
            _ => {}
        }
        if m.is_capture() {
            revoke_for_corner(&mut self.castling, us.opposite(), m.to);
        }
    }
}

fn revoke_for_corner(rights: &mut CastlingRights, color: Color, sq: Square) {
    if sq == CastleSide::King.rook_squares(color).0 {
        rights.revoke_kingside(color);
    } else if sq == CastleSide::Queen.rook_squares(color).0 {
        rights.revoke_queenside(color);
    }
}

/// The square of the pawn taken en passant: behind `to` from the mover's view.
fn en_passant_victim(m: &Move) -> Option<Square> {
    m.to.offset(-m.color().pawn_direction(), 0)
}
