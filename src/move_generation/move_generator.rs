//! Move generation interface and its error type.
//!
//! Generators work on the placement of the side to move, where that side is
//! always the bottom camp, so one implementation serves red and black.

use std::error::Error;
use std::fmt;

use crate::game_state::game_state::GameState;
use crate::game_state::jieqi_types::Move;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    /// The side to move has no legal move.
    NoLegalMoves,
    InvalidState(String),
}

impl fmt::Display for MoveGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveGenerationError::NoLegalMoves => write!(f, "no legal moves"),
            MoveGenerationError::InvalidState(msg) => write!(f, "invalid game state: {msg}"),
        }
    }
}

impl Error for MoveGenerationError {}

pub trait MoveGenerator: Send + Sync {
    /// Legal moves for the side to move, in that side's perspective.
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<Move>>;
}
