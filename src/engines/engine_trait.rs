//! Thinker abstraction shared by the host, the session registry and the
//! protocol loop.
//!
//! A thinker searches the position it was built over and answers with a
//! 4-character move in the searched side's own frame, or an `ERROR:` token.

use std::fmt;
use std::str::FromStr;

use crate::game_state::jieqi_types::Move;
use crate::move_generation::move_generator::MoveGenerationError;

/// Prefix of every failure answer.
pub const ERROR_PREFIX: &str = "ERROR:";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThinkOutput {
    pub best_move: Move,
    /// `best_move` as 4-char notation, in the mover's frame.
    pub notation: String,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub info_lines: Vec<String>,
}

pub trait Thinker {
    fn name(&self) -> &str;

    fn search(&mut self, max_depth: u8) -> Result<ThinkOutput, MoveGenerationError>;

    /// Best move notation, or `ERROR:<reason>`.
    fn think(&mut self, max_depth: u8) -> String {
        match self.search(max_depth) {
            Ok(output) => output.notation,
            Err(err) => {
                log::warn!("{} failed: {err}", self.name());
                format!("{ERROR_PREFIX}{err}")
            }
        }
    }
}

/// True for anything that is not a well-formed move answer.
#[inline]
pub fn is_error_answer(answer: &str) -> bool {
    answer.starts_with("ERROR") || answer.len() != 4
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThinkerKind {
    #[default]
    AlphaBeta,
    Greedy,
}

impl fmt::Display for ThinkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThinkerKind::AlphaBeta => write!(f, "alphabeta"),
            ThinkerKind::Greedy => write!(f, "greedy"),
        }
    }
}

impl FromStr for ThinkerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alphabeta" | "alpha-beta" | "ab" => Ok(ThinkerKind::AlphaBeta),
            "greedy" => Ok(ThinkerKind::Greedy),
            other => Err(format!("unknown thinker '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingThinker;

    impl Thinker for FailingThinker {
        fn name(&self) -> &str {
            "failing"
        }

        fn search(&mut self, _max_depth: u8) -> Result<ThinkOutput, MoveGenerationError> {
            Err(MoveGenerationError::NoLegalMoves)
        }
    }

    #[test]
    fn think_maps_errors_to_error_tokens() {
        let answer = FailingThinker.think(3);
        assert_eq!(answer, "ERROR:no legal moves");
        assert!(is_error_answer(&answer));
        assert!(!is_error_answer("b2e2"));
        assert!(is_error_answer("b2e"));
    }

    #[test]
    fn thinker_kind_parses_case_insensitively() {
        assert_eq!("Greedy".parse::<ThinkerKind>(), Ok(ThinkerKind::Greedy));
        assert_eq!("alphabeta".parse::<ThinkerKind>(), Ok(ThinkerKind::AlphaBeta));
        assert!("mcts".parse::<ThinkerKind>().is_err());
        assert_eq!(ThinkerKind::Greedy.to_string(), "greedy");
    }
}
