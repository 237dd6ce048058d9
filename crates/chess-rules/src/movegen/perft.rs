//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth,
//! which can be compared against known-correct values to validate move
//! generation and make/undo together.

use super::{generate_moves, in_check};
use crate::Position;
use tracing::debug;

/// Counts the leaf nodes at the given depth.
///
/// Every pseudo-legal move is applied; if it leaves the mover's king in
/// check it is pruned, otherwise the subtree is counted. The move is taken
/// back either way, so the position is unchanged on return.
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let us = position.side_to_move();
    let mut nodes = 0u64;
    for m in generate_moves(position) {
        position.apply(m);
        if !in_check(position.board(), us) {
            nodes += perft(position, depth - 1);
        }
        position.take_back();
    }
    nodes
}

/// Perft with divide: node counts below each legal root move, sorted by
/// move text. Useful for locating the subtree with a wrong count.
pub fn perft_divide(position: &mut Position, depth: u32) -> Vec<(String, u64)> {
    let mut results = Vec::new();
    if depth == 0 {
        return results;
    }

    for m in position.legal_moves() {
        position.apply(m);
        let nodes = perft(position, depth - 1);
        position.take_back();
        debug!(mv = %m, nodes, "perft divide");
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn perft_fen(fen: &str, depth: u32) -> u64 {
        let mut position = Position::from_fen(fen).unwrap();
        let nodes = perft(&mut position, depth);
        assert_eq!(position.to_fen(), fen, "perft left the position changed");
        nodes
    }

    #[test]
    fn perft_depth_0_is_one() {
        assert_eq!(perft(&mut Position::startpos(), 0), 1);
    }

    // Starting position perft values (well-known and verified)
    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&mut Position::startpos(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&mut Position::startpos(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&mut Position::startpos(), 3), 8902);
    }

    #[test]
    fn perft_startpos_depth_4() {
        let mut position = Position::startpos();
        assert_eq!(perft(&mut position, 4), 197281);
        assert_eq!(position, Position::startpos());
    }

    // Depth 5 is slower, only run in release mode
    #[test]
    #[ignore]
    fn perft_startpos_depth_5() {
        assert_eq!(perft(&mut Position::startpos(), 5), 4865609);
    }

    // Kiwipete - castling, en passant and pins everywhere
    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(perft_fen(KIWIPETE, 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(perft_fen(KIWIPETE, 2), 2039);
    }

    #[test]
    #[ignore]
    fn perft_kiwipete_depth_3() {
        assert_eq!(perft_fen(KIWIPETE, 3), 97862);
    }

    // Position 3: check evasion, en passant, promotion
    #[test]
    fn perft_position3() {
        assert_eq!(perft_fen(POSITION_3, 1), 14);
        assert_eq!(perft_fen(POSITION_3, 2), 191);
        assert_eq!(perft_fen(POSITION_3, 3), 2812);
    }

    #[test]
    #[ignore]
    fn perft_position3_depth_4() {
        assert_eq!(perft_fen(POSITION_3, 4), 43238);
    }

    // Position 4: lots of promotions and captures
    #[test]
    fn perft_position4() {
        assert_eq!(perft_fen(POSITION_4, 1), 6);
        assert_eq!(perft_fen(POSITION_4, 2), 264);
        assert_eq!(perft_fen(POSITION_4, 3), 9467);
    }

    // Position 5
    #[test]
    fn perft_position5() {
        assert_eq!(perft_fen(POSITION_5, 1), 44);
        assert_eq!(perft_fen(POSITION_5, 2), 1486);
    }

    #[test]
    #[ignore]
    fn perft_position5_depth_3() {
        assert_eq!(perft_fen(POSITION_5, 3), 62379);
    }

    #[test]
    fn perft_divide_works() {
        let mut position = Position::startpos();
        let results = perft_divide(&mut position, 2);
        assert_eq!(results.len(), 20);
        assert!(results.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(results.iter().all(|(_, n)| *n == 20));
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
        assert_eq!(position, Position::startpos());
    }

    #[test]
    fn perft_divide_depth_1_counts_one_per_move() {
        let mut position = Position::from_fen(KIWIPETE).unwrap();
        let results = perft_divide(&mut position, 1);
        assert_eq!(results.len(), 48);
        assert!(results.iter().all(|(_, n)| *n == 1));
        assert!(results.iter().any(|(m, _)| m == "e1g1"));
        assert!(results.iter().any(|(m, _)| m == "e1c1"));
    }
}
