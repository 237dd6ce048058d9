//! Move generation.
//!
//! Moves are generated pseudo-legally: every move the pieces can make by
//! their movement rules, without checking whether the mover's king is left in
//! check. [`generate_legal_moves`] applies that filter by making and taking
//! back each move.

mod attacks;
mod check;
pub mod perft;

use crate::castling::{king_home, CastleSide};
use crate::Position;
use chess_core::{Move, Piece, PieceKind, PriorState};

pub use attacks::{
    attacks_from, bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks,
    rook_attacks,
};
pub use check::{in_check, is_square_attacked};

/// A growable list of moves.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Capacity reserved up front; typical positions have fewer moves.
    const INITIAL_CAPACITY: usize = 64;

    /// Creates an empty move list.
    #[inline]
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(Self::INITIAL_CAPACITY),
        }
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all pseudo-legal moves for the side to move.
///
/// Each move carries the position's current state as its undo snapshot.
pub fn generate_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let prior = position.prior_state();

    generate_pawn_moves(position, prior, &mut moves);
    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        generate_piece_moves(position, kind, prior, &mut moves);
    }
    generate_castling_moves(position, prior, &mut moves);

    moves
}

/// Generates the moves that do not leave the mover's king in check.
pub fn generate_legal_moves(position: &mut Position) -> MoveList {
    let mut moves = generate_moves(position);
    let us = position.side_to_move();
    moves.retain(|m| {
        position.apply(*m);
        let legal = !in_check(position.board(), us);
        position.take_back();
        legal
    });
    moves
}

fn generate_pawn_moves(position: &Position, prior: PriorState, moves: &mut MoveList) {
    let us = position.side_to_move();
    let board = position.board();
    let pawn = Piece::new(PieceKind::Pawn, us);
    let forward = us.pawn_direction();

    for (from, _) in board.pieces().filter(|&(_, p)| p == pawn) {
        // Pushes
        if let Some(one) = from.offset(forward, 0).filter(|&sq| !board.is_occupied(sq)) {
            push_pawn_move(Move::new(from, one, pawn, prior), moves);
            if from.rank() == us.pawn_rank() {
                if let Some(two) = one.offset(forward, 0).filter(|&sq| !board.is_occupied(sq)) {
                    moves.push(Move::new(from, two, pawn, prior));
                }
            }
        }

        // Captures, including en passant onto the empty target square
        for to in pawn_attacks(board, from, us) {
            match board.get(to) {
                Some(victim) => {
                    push_pawn_move(Move::new(from, to, pawn, prior).with_capture(victim), moves)
                }
                None if position.en_passant() == Some(to) => {
                    let victim = to.offset(-forward, 0).and_then(|sq| board.get(sq));
                    if victim == Some(Piece::new(PieceKind::Pawn, us.opposite())) {
                        moves.push(Move::new(from, to, pawn, prior).en_passant());
                    }
                }
                None => {}
            }
        }
    }
}

/// Pushes `m`, fanned out into the four promotions if it reaches the last rank.
fn push_pawn_move(m: Move, moves: &mut MoveList) {
    if m.to.rank() == m.color().promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(m.with_promotion(kind));
        }
    } else {
        moves.push(m);
    }
}

/// Knight, bishop, rook, queen and king moves straight from the attack sets.
fn generate_piece_moves(
    position: &Position,
    kind: PieceKind,
    prior: PriorState,
    moves: &mut MoveList,
) {
    let board = position.board();
    let piece = Piece::new(kind, position.side_to_move());

    for (from, _) in board.pieces().filter(|&(_, p)| p == piece) {
        for to in attacks_from(board, from) {
            let m = Move::new(from, to, piece, prior);
            match board.get(to) {
                Some(victim) => moves.push(m.with_capture(victim)),
                None => moves.push(m),
            }
        }
    }
}

/// Generates castling moves whose path is clear and unattacked.
///
/// The landing square is not checked here; the legality filter rejects a
/// castle into check like any other move.
fn generate_castling_moves(position: &Position, prior: PriorState, moves: &mut MoveList) {
    let us = position.side_to_move();
    let board = position.board();
    let king = Piece::new(PieceKind::King, us);
    let home = king_home(us);

    if board.get(home) != Some(king) || in_check(board, us) {
        return;
    }

    for side in CastleSide::BOTH {
        if !side.has_right(position.castling_rights(), us) {
            continue;
        }
        let (corner, _) = side.rook_squares(us);
        if board.get(corner) != Some(Piece::new(PieceKind::Rook, us)) {
            continue;
        }
        if side.between(us).iter().any(|&sq| board.is_occupied(sq)) {
            continue;
        }
        if is_square_attacked(board, side.pass_through(us), us.opposite()) {
            continue;
        }
        moves.push(Move::new(home, side.king_target(us), king, prior).castling());
    }
}
