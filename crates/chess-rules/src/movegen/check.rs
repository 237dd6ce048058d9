//! Check detection.
//!
//! Attacks are looked up in reverse: from the target square, walk each piece
//! pattern outward and see whether the piece found there could make the same
//! trip back. This answers "is this square attacked by that color" for either
//! side, regardless of whose turn it is.

use super::attacks::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};
use crate::Board;
use chess_core::{Color, Piece, PieceKind, Square};

/// Returns true if any piece of `by_color` attacks `sq`.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    // A pawn of `by_color` attacks `sq` from one rank behind it
    let back = -by_color.pawn_direction();
    let pawn = Piece::new(PieceKind::Pawn, by_color);
    if [-1, 1]
        .iter()
        .filter_map(|&df| sq.offset(back, df))
        .any(|from| board.get(from) == Some(pawn))
    {
        return true;
    }

    let knight = Piece::new(PieceKind::Knight, by_color);
    if KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(dr, df)| sq.offset(dr, df))
        .any(|from| board.get(from) == Some(knight))
    {
        return true;
    }

    let king = Piece::new(PieceKind::King, by_color);
    if KING_OFFSETS
        .iter()
        .filter_map(|&(dr, df)| sq.offset(dr, df))
        .any(|from| board.get(from) == Some(king))
    {
        return true;
    }

    let diagonal = |p: Piece| {
        p.color == by_color && matches!(p.kind, PieceKind::Bishop | PieceKind::Queen)
    };
    if DIAGONALS
        .iter()
        .filter_map(|&dir| first_piece_along(board, sq, dir))
        .any(diagonal)
    {
        return true;
    }

    let orthogonal =
        |p: Piece| p.color == by_color && matches!(p.kind, PieceKind::Rook | PieceKind::Queen);
    ORTHOGONALS
        .iter()
        .filter_map(|&dir| first_piece_along(board, sq, dir))
        .any(orthogonal)
}

/// Returns true if the king of `color` is attacked.
///
/// A board without a king of that color is never in check.
pub fn in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king_sq) => is_square_attacked(board, king_sq, color.opposite()),
        None => false,
    }
}

fn first_piece_along(board: &Board, sq: Square, (dr, df): (i8, i8)) -> Option<Piece> {
    let mut current = sq;
    while let Some(next) = current.offset(dr, df) {
        if let Some(p) = board.get(next) {
            return Some(p);
        }
        current = next;
    }
    None
}
