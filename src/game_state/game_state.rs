//! Core incremental board state representation.
//!
//! `GameState` holds the board twice, once per perspective, so the search can
//! always move the bottom camp of `placement[side_to_move]`. Both arrays are
//! kept in step by make/unmake; the black array is the red one rotated.

use std::collections::HashMap;

use rand::Rng;

use crate::game_state::jieqi_rules::{start_square_kind, STARTING_POSITION};
use crate::game_state::jieqi_types::*;
use crate::jieqi_errors::JieqiError;
use crate::search::zobrist::compute_zobrist_key;
use crate::utils::board_text::{parse_external_cells, placement_to_external};
use crate::utils::notation::{board_squares, empty_placement, reverse, rotate};

/// Incremental game state optimized for fast move making/unmaking.
#[derive(Debug, Clone)]
pub struct GameState {
    // [perspective] -> cells, Camp::Bottom being that perspective's side.
    pub placement: [Placement; 2],

    pub side_to_move: Side,
    pub round: u16,
    pub ply: u16,

    pub zobrist_key: u64,
    /// Position fingerprint -> number of times it has occurred.
    pub history: HashMap<u64, u16>,

    pub dark: DarkPieceModel,

    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        let empty = empty_placement();
        let mut state = Self {
            placement: [empty, empty],
            side_to_move: Side::Red,
            round: 0,
            ply: 0,
            zobrist_key: 0,
            history: HashMap::new(),
            dark: DarkPieceModel::default(),
            undo_stack: Vec::new(),
        };
        state.zobrist_key = compute_zobrist_key(&state);
        state
    }
}

impl GameState {
    /// Empty board, red to move.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        Self::from_external(STARTING_POSITION.as_bytes(), true, 0)
            .expect("starting position should always parse")
    }

    pub fn from_external(
        cells: &[u8],
        red_to_move: bool,
        history_len: usize,
    ) -> Result<Self, JieqiError> {
        let mut state = Self::default();
        state.set_from_external(cells, red_to_move, history_len)?;
        Ok(state)
    }

    /// Replace the position from external board text.
    ///
    /// Repetition history is kept so a session can feed successive positions
    /// of one game; the new position is recorded as one more occurrence. On
    /// error the state is left untouched.
    pub fn set_from_external(
        &mut self,
        cells: &[u8],
        red_to_move: bool,
        history_len: usize,
    ) -> Result<(), JieqiError> {
        let red = parse_external_cells(cells)?;
        let mut dark = self.dark.clone();
        dark.rebuild(&red)?;
        warn_on_displaced_markers(&red);

        self.placement = [red, rotate(&red)];
        self.side_to_move = if red_to_move { Side::Red } else { Side::Black };
        self.round = u16::try_from(history_len / 2).unwrap_or(u16::MAX);
        self.ply = 0;
        self.undo_stack.clear();
        self.dark = dark;
        self.zobrist_key = compute_zobrist_key(self);
        self.record_position();
        Ok(())
    }

    /// Current position as external board text (red perspective).
    #[inline]
    pub fn to_external(&self) -> String {
        placement_to_external(&self.placement[Side::Red.index()])
    }

    /// Rebuild dark-piece counts from the board, dropping stale assumptions.
    pub fn initialize_dark_info(&mut self) -> Result<(), JieqiError> {
        self.dark.rebuild(&self.placement[Side::Red.index()])
    }

    /// Draw a fresh identity for every dark square.
    pub fn generate_random_map<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let red = &self.placement[Side::Red.index()];
        self.dark.generate_random_map(red, rng);
    }

    /// `placement[Black]` is exactly the rotated `placement[Red]`.
    pub fn is_mirror_consistent(&self) -> bool {
        self.placement[Side::Black.index()] == rotate(&self.placement[Side::Red.index()])
    }

    /// Occurrences of the current position, including this one.
    #[inline]
    pub fn repetition_count(&self) -> u16 {
        self.history.get(&self.zobrist_key).copied().unwrap_or(0)
    }

    #[inline]
    pub fn record_position(&mut self) {
        *self.history.entry(self.zobrist_key).or_insert(0) += 1;
    }

    pub(crate) fn forget_position(&mut self) {
        if let Some(count) = self.history.get_mut(&self.zobrist_key) {
            *count -= 1;
            if *count == 0 {
                self.history.remove(&self.zobrist_key);
            }
        }
    }

    /// Placement of the side to move, whose pieces are the bottom camp.
    #[inline]
    pub fn mover_placement(&self) -> &Placement {
        &self.placement[self.side_to_move.index()]
    }
}

/// Red-perspective square for a square of `perspective`'s placement.
#[inline]
pub const fn to_red_square(perspective: Side, square: Square) -> Square {
    match perspective {
        Side::Red => square,
        Side::Black => reverse(square),
    }
}

fn warn_on_displaced_markers(red: &Placement) {
    for square in board_squares() {
        let Cell::Dark(camp, marker) = red[square as usize] else {
            continue;
        };
        let own_square = match camp {
            Camp::Bottom => square,
            Camp::Top => reverse(square),
        };
        if start_square_kind(own_square) != Some(marker) {
            log::warn!(
                "dark {:?} marker {:?} at square {} is not on its start square",
                camp.side_from(Side::Red),
                marker,
                square
            );
        }
    }
}
