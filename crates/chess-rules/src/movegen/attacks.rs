//! Attack geometry for all piece types.
//!
//! Each function answers: which squares could a piece of `color` standing on
//! `sq` move to or capture on, if this were the only rule? Turn order, pins
//! and checks are ignored. Results never include off-board squares or squares
//! holding a piece of the attacker's own color.

use crate::{Board, SquareSet};
use chess_core::{Color, PieceKind, Square};

/// Knight jumps as (rank, file) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// King steps as (rank, file) deltas.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Returns the attack set of whatever piece stands on `sq`; empty if none.
pub fn attacks_from(board: &Board, sq: Square) -> SquareSet {
    let Some(piece) = board.get(sq) else {
        return SquareSet::EMPTY;
    };
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(board, sq, color),
        PieceKind::Knight => knight_attacks(board, sq, color),
        PieceKind::Bishop => bishop_attacks(board, sq, color),
        PieceKind::Rook => rook_attacks(board, sq, color),
        PieceKind::Queen => queen_attacks(board, sq, color),
        PieceKind::King => king_attacks(board, sq, color),
    }
}

/// The two forward diagonals of a pawn. Pushes are not attacks.
pub fn pawn_attacks(board: &Board, sq: Square, color: Color) -> SquareSet {
    let dir = color.pawn_direction();
    steps(board, sq, color, &[(dir, -1), (dir, 1)])
}

pub fn knight_attacks(board: &Board, sq: Square, color: Color) -> SquareSet {
    steps(board, sq, color, &KNIGHT_OFFSETS)
}

pub fn king_attacks(board: &Board, sq: Square, color: Color) -> SquareSet {
    steps(board, sq, color, &KING_OFFSETS)
}

pub fn bishop_attacks(board: &Board, sq: Square, color: Color) -> SquareSet {
    rays(board, sq, color, &DIAGONALS)
}

pub fn rook_attacks(board: &Board, sq: Square, color: Color) -> SquareSet {
    rays(board, sq, color, &ORTHOGONALS)
}

pub fn queen_attacks(board: &Board, sq: Square, color: Color) -> SquareSet {
    bishop_attacks(board, sq, color) | rook_attacks(board, sq, color)
}

/// Single steps, dropping off-board squares and friendly-occupied squares.
fn steps(board: &Board, sq: Square, color: Color, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .filter_map(|&(dr, df)| sq.offset(dr, df))
        .filter(|&to| !board.is_color(to, color))
        .collect()
}

/// Rays that stop at the first occupied square, keeping it only if it holds
/// an enemy piece.
fn rays(board: &Board, sq: Square, color: Color, directions: &[(i8, i8)]) -> SquareSet {
    let mut set = SquareSet::EMPTY;
    for &(dr, df) in directions {
        let mut current = sq;
        while let Some(next) = current.offset(dr, df) {
            match board.get(next) {
                None => set.insert(next),
                Some(p) => {
                    if p.color != color {
                        set.insert(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Fen, Piece};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(fen: &str) -> Board {
        Board::from_cells(Fen::parse(fen).unwrap().board)
    }

    fn set(squares: &[&str]) -> SquareSet {
        squares.iter().map(|s| sq(s)).collect()
    }

    #[test]
    fn knight_attacks_center_corner_edge() {
        let empty = Board::empty();
        assert_eq!(knight_attacks(&empty, sq("d4"), Color::White).len(), 8);
        assert_eq!(knight_attacks(&empty, sq("a1"), Color::White).len(), 2);
        assert_eq!(knight_attacks(&empty, sq("a4"), Color::White).len(), 4);
        assert_eq!(
            knight_attacks(&empty, sq("e4"), Color::Black),
            set(&["d6", "f6", "g5", "g3", "f2", "d2", "c3", "c5"])
        );
    }

    #[test]
    fn king_attacks_center_corner_edge() {
        let empty = Board::empty();
        assert_eq!(king_attacks(&empty, sq("d4"), Color::White).len(), 8);
        assert_eq!(king_attacks(&empty, sq("a1"), Color::White).len(), 3);
        assert_eq!(king_attacks(&empty, sq("a4"), Color::White).len(), 5);
    }

    #[test]
    fn pawn_attacks_by_color() {
        let empty = Board::empty();
        assert_eq!(
            pawn_attacks(&empty, sq("d4"), Color::White),
            set(&["c5", "e5"])
        );
        assert_eq!(
            pawn_attacks(&empty, sq("d4"), Color::Black),
            set(&["c3", "e3"])
        );
        assert_eq!(pawn_attacks(&empty, sq("a4"), Color::White), set(&["b5"]));
        assert!(pawn_attacks(&empty, sq("d8"), Color::White).is_empty());
    }

    #[test]
    fn pawn_attacks_ignore_pushes() {
        let b = board("8/8/8/8/3p4/8/8/8 w - - 0 1");
        // the d4 pawn can push to d3 but that is not an attack
        assert!(!attacks_from(&b, sq("d4")).contains(sq("d3")));
    }

    #[test]
    fn rook_ray_stops_at_first_blocker() {
        // rook d4, enemy pawn d6, own pawn f4, enemy knight b4, nothing south
        let b = board("8/8/3p4/8/1n1R1P2/8/8/8 w - - 0 1");
        let attacks = rook_attacks(&b, sq("d4"), Color::White);
        assert_eq!(
            attacks,
            set(&["d5", "d6", "e4", "c4", "b4", "d3", "d2", "d1"])
        );
        assert!(!attacks.contains(sq("d7")));
        assert!(!attacks.contains(sq("f4")));
        assert!(!attacks.contains(sq("a4")));
    }

    #[test]
    fn rook_on_empty_board_sees_fourteen_squares() {
        let b = board("8/8/8/8/3R4/8/8/8 w - - 0 1");
        assert_eq!(attacks_from(&b, sq("d4")).len(), 14);
    }

    #[test]
    fn bishop_rays_include_enemy_blockers() {
        let b = board("8/8/5p2/8/3B4/2P5/8/8 w - - 0 1");
        let attacks = bishop_attacks(&b, sq("d4"), Color::White);
        assert!(attacks.contains(sq("e5")));
        assert!(attacks.contains(sq("f6")));
        assert!(!attacks.contains(sq("g7")));
        assert!(!attacks.contains(sq("c3")));
        assert!(attacks.contains(sq("a7")));
        assert!(attacks.contains(sq("g1")));
    }

    #[test]
    fn queen_combines_both_directions() {
        let empty = Board::empty();
        assert_eq!(queen_attacks(&empty, sq("d4"), Color::White).len(), 27);
    }

    #[test]
    fn own_pieces_are_filtered() {
        let b = Board::standard();
        // knight on g1 cannot land on e2 (own pawn)
        assert_eq!(attacks_from(&b, Square::G1), set(&["f3", "h3"]));
        assert!(attacks_from(&b, Square::E1).is_empty());
        assert!(attacks_from(&b, Square::A1).is_empty());
    }

    #[test]
    fn empty_square_has_no_attacks() {
        let mut b = Board::empty();
        assert!(attacks_from(&b, sq("e4")).is_empty());
        b.set(sq("e4"), Some(Piece::new(PieceKind::King, Color::Black)));
        assert_eq!(attacks_from(&b, sq("e4")).len(), 8);
    }
}
