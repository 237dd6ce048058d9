//! Move selection.

use chess_core::Move;
use chess_rules::Position;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("no legal moves in this position")]
    NoLegalMoves,
}

/// Picks a move for the side to move.
///
/// Implementations may make and take back moves on `position` but must leave
/// it as they found it.
pub trait MoveFinder {
    fn find_move(&mut self, position: &mut Position) -> Result<Move, SearchError>;
}

/// Chooses uniformly among the legal moves.
pub struct RandomMoveFinder<R> {
    rng: R,
}

impl<R: Rng> RandomMoveFinder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomMoveFinder<rand::rngs::ThreadRng> {
    /// A finder drawing from the thread-local generator.
    pub fn from_thread_rng() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> MoveFinder for RandomMoveFinder<R> {
    fn find_move(&mut self, position: &mut Position) -> Result<Move, SearchError> {
        let moves = position.legal_moves();
        debug!(
            candidates = moves.len(),
            "moves: {}",
            moves
                .as_slice()
                .iter()
                .map(|m| m.to_uci())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let chosen = moves
            .as_slice()
            .choose(&mut self.rng)
            .copied()
            .ok_or(SearchError::NoLegalMoves)?;
        debug!(mv = %chosen, "selected");
        Ok(chosen)
    }
}
