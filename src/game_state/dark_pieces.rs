//! Hidden-identity bookkeeping.
//!
//! For each side the model keeps the multiset of identities that have not been
//! revealed yet and the count of those that have (still on the board or
//! already captured). Each dark square additionally carries the identity the
//! engine currently assumes for it, drawn by [`DarkPieceModel::generate_random_map`].
//! Assumptions are keyed by red-perspective square.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game_state::jieqi_rules::INITIAL_CONCEALED_COUNTS;
use crate::game_state::jieqi_types::*;
use crate::jieqi_errors::JieqiError;
use crate::utils::notation::board_squares;

/// Small per-kind counter indexed by [`PieceKind::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PieceCounts([u8; PIECE_KIND_COUNT]);

impl PieceCounts {
    pub const fn from_array(counts: [u8; PIECE_KIND_COUNT]) -> Self {
        Self(counts)
    }

    #[inline]
    pub const fn count(&self, kind: PieceKind) -> u8 {
        self.0[kind.index()]
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|c| u32::from(*c)).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Expand into one entry per unit, in kind order.
    pub fn to_vec(&self) -> Vec<PieceKind> {
        let mut out = Vec::with_capacity(self.total() as usize);
        for kind in PieceKind::ALL {
            for _ in 0..self.count(kind) {
                out.push(kind);
            }
        }
        out
    }

    #[inline]
    fn add(&mut self, kind: PieceKind) {
        self.0[kind.index()] += 1;
    }

    #[inline]
    fn remove(&mut self, kind: PieceKind) -> bool {
        let slot = &mut self.0[kind.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

#[derive(Debug, Clone)]
pub struct DarkPieceModel {
    concealed: [PieceCounts; 2],
    revealed: [PieceCounts; 2],
    assumed: [Option<PieceKind>; BOARD_CELLS],
}

impl Default for DarkPieceModel {
    fn default() -> Self {
        Self {
            concealed: [INITIAL_CONCEALED_COUNTS; 2],
            revealed: [PieceCounts::default(); 2],
            assumed: [None; BOARD_CELLS],
        }
    }
}

impl DarkPieceModel {
    /// Identities of `side` not yet revealed.
    #[inline]
    pub fn remaining_concealed(&self, side: Side) -> PieceCounts {
        self.concealed[side.index()]
    }

    /// Concealable identities of `side` already revealed, on board or captured.
    #[inline]
    pub fn revealed_counts(&self, side: Side) -> PieceCounts {
        self.revealed[side.index()]
    }

    /// Identity currently assumed for the dark piece on `red_square`.
    #[inline]
    pub fn assumed_value(&self, red_square: Square) -> Option<PieceKind> {
        self.assumed[red_square as usize]
    }

    /// Rebuild counts from a red-perspective placement.
    ///
    /// Every revealed non-general on the board is counted as revealed; all
    /// remaining identities are concealed. Assumptions survive only on squares
    /// that are still dark and only while they fit the rebuilt multisets.
    pub fn rebuild(&mut self, red_placement: &Placement) -> Result<(), JieqiError> {
        let mut revealed = [PieceCounts::default(); 2];
        let mut dark_count = [0u32; 2];

        for square in board_squares() {
            match red_placement[square as usize] {
                Cell::Revealed(camp, kind) if kind != PieceKind::King => {
                    let side = camp.side_from(Side::Red);
                    revealed[side.index()].add(kind);
                }
                Cell::Dark(camp, _) => {
                    dark_count[camp.side_from(Side::Red).index()] += 1;
                }
                _ => {}
            }
        }

        let mut concealed = [PieceCounts::default(); 2];
        for side in [Side::Red, Side::Black] {
            for kind in PieceKind::CONCEALABLE {
                let initial = INITIAL_CONCEALED_COUNTS.count(kind);
                let shown = revealed[side.index()].count(kind);
                if shown > initial {
                    return Err(JieqiError::PieceCountExceeded { side, kind });
                }
                concealed[side.index()].0[kind.index()] = initial - shown;
            }
            if dark_count[side.index()] > concealed[side.index()].total() {
                return Err(JieqiError::TooManyConcealed(side));
            }
        }

        self.concealed = concealed;
        self.revealed = revealed;
        self.retain_consistent_assumptions(red_placement);
        Ok(())
    }

    fn retain_consistent_assumptions(&mut self, red_placement: &Placement) {
        let mut budget = self.concealed;
        let mut consistent = true;
        for square in board_squares() {
            let slot = &mut self.assumed[square as usize];
            match red_placement[square as usize] {
                Cell::Dark(camp, _) => {
                    if let Some(kind) = *slot {
                        if !budget[camp.side_from(Side::Red).index()].remove(kind) {
                            consistent = false;
                        }
                    }
                }
                _ => *slot = None,
            }
        }
        if !consistent {
            self.assumed = [None; BOARD_CELLS];
        }
    }

    /// True when every dark square of `red_placement` has an assumption.
    pub fn is_fully_assigned(&self, red_placement: &Placement) -> bool {
        board_squares().all(|square| {
            !red_placement[square as usize].is_dark() || self.assumed[square as usize].is_some()
        })
    }

    /// Draw one concrete identity for every dark square.
    ///
    /// Each side's concealed multiset is shuffled and dealt to its dark squares
    /// in board order; a multiset larger than the number of dark squares (some
    /// hidden pieces were captured unseen) leaves the surplus unassigned.
    pub fn generate_random_map<R: Rng + ?Sized>(&mut self, red_placement: &Placement, rng: &mut R) {
        self.assumed = [None; BOARD_CELLS];
        for side in [Side::Red, Side::Black] {
            let mut pool = self.concealed[side.index()].to_vec();
            pool.shuffle(rng);
            let mut deal = pool.into_iter();
            for square in board_squares() {
                if let Cell::Dark(camp, _) = red_placement[square as usize] {
                    if camp.side_from(Side::Red) == side {
                        self.assumed[square as usize] = deal.next();
                    }
                }
            }
        }
    }

    /// Move one unit of `actual` from concealed to revealed for `side`.
    ///
    /// # Panics
    /// Panics when `actual` is not in the concealed multiset: the board and
    /// the model disagree and the position is corrupt.
    pub fn reveal(&mut self, side: Side, red_square: Square, actual: PieceKind) {
        if !self.concealed[side.index()].remove(actual) {
            panic!("revealed {actual:?} for {side:?} but none remain concealed");
        }
        self.revealed[side.index()].add(actual);
        self.assumed[red_square as usize] = None;
    }

    /// Exact inverse of [`DarkPieceModel::reveal`].
    pub fn unreveal(&mut self, side: Side, red_square: Square, actual: PieceKind) {
        if !self.revealed[side.index()].remove(actual) {
            panic!("unrevealed {actual:?} for {side:?} but it was never revealed");
        }
        self.concealed[side.index()].add(actual);
        self.assumed[red_square as usize] = Some(actual);
    }

    /// Mean material of `side`'s concealed multiset under `values`.
    pub fn expected_material(&self, side: Side, values: &[i32; PIECE_KIND_COUNT]) -> i32 {
        let pool = &self.concealed[side.index()];
        let units = pool.total() as i32;
        if units == 0 {
            return 0;
        }
        let sum: i32 = PieceKind::ALL
            .iter()
            .map(|kind| i32::from(pool.count(*kind)) * values[kind.index()])
            .sum();
        sum / units
    }
}
