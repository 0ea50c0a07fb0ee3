//! Errors surfaced at the engine boundary.
//!
//! `JieqiError` covers recoverable conditions: malformed board text, move
//! notation that does not parse, impossible piece counts, unknown sessions and
//! unreadable score tables. Callers match on it and degrade gracefully (an
//! `ERROR:` token, a zero evaluation, zeroed tables).
//!
//! Broken internal invariants (revealing a piece kind that is not concealed,
//! perspective arrays diverging) are not represented here. Those panic: they
//! mean the board state is corrupt and no answer computed from it can be
//! trusted.

use std::error::Error;
use std::fmt;

use crate::game_state::jieqi_types::{PieceKind, Side};
use crate::move_generation::move_generator::MoveGenerationError;

/// Opaque identifier of a game held by the session registry.
pub type GameId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JieqiError {
    /// Board text did not hold exactly 90 cells.
    ///
    /// Payload: the length that was received.
    InvalidBoardLength(usize),

    /// A board byte is not a known piece, dark marker or empty code.
    InvalidCellCode { index: usize, code: char },

    /// A move string is not 4 characters of `[a-i][0-9][a-i][0-9]`.
    InvalidNotation(String),

    /// More pieces of one kind on the board than the set contains.
    PieceCountExceeded { side: Side, kind: PieceKind },

    /// More face-down pieces than identities left to assign them.
    TooManyConcealed(Side),

    /// Session lookup by an id that was never created or already deleted.
    UnknownSession(GameId),

    /// The piece-square score table could not be read or parsed.
    ScoreTable(String),

    /// Search or move generation failed.
    Search(MoveGenerationError),
}

impl fmt::Display for JieqiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JieqiError::InvalidBoardLength(len) => {
                write!(f, "board must have 90 cells, got {len}")
            }
            JieqiError::InvalidCellCode { index, code } => {
                write!(f, "invalid cell code {code:?} at index {index}")
            }
            JieqiError::InvalidNotation(text) => write!(f, "invalid move notation '{text}'"),
            JieqiError::PieceCountExceeded { side, kind } => {
                write!(f, "too many {kind:?} pieces for {side:?}")
            }
            JieqiError::TooManyConcealed(side) => {
                write!(f, "{side:?} has more dark pieces than concealed identities")
            }
            JieqiError::UnknownSession(id) => write!(f, "unknown game id {id}"),
            JieqiError::ScoreTable(msg) => write!(f, "score table: {msg}"),
            JieqiError::Search(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JieqiError {}

impl From<MoveGenerationError> for JieqiError {
    fn from(err: MoveGenerationError) -> Self {
        JieqiError::Search(err)
    }
}
