//! Pluggable board evaluation interfaces and the default Jieqi evaluator.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.

use std::sync::Arc;

use crate::game_state::{game_state::GameState, jieqi_types::*};
use crate::search::empty_head_cannon::{empty_head_cannon_bonus, CannonWeights};
use crate::search::piece_square_tables::ScoreTables;
use crate::utils::notation::{board_squares, from_internal, reverse, BOARD_COLS};

pub const MATE_SCORE: i32 = 30000;

/// Material by [`PieceKind::index`]. The general is priceless and never
/// enters the sum.
pub const PIECE_VALUES: [i32; PIECE_KIND_COUNT] = [900, 400, 200, 200, 0, 450, 100];

const PHASE_WEIGHTS: [i32; PIECE_KIND_COUNT] = [4, 2, 1, 1, 0, 2, 0];
const DARK_PHASE_WEIGHT: i32 = 2;

/// Phase of a board with all heavy and minor pieces present.
pub const PHASE_MAX: i32 = 40;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Evaluation split as bottom-minus-top score plus each camp's empty-head
/// cannon bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scan {
    pub score: i32,
    pub kongtoupao_score: i32,
    pub kongtoupao_score_opponent: i32,
}

impl Scan {
    #[inline]
    pub fn total(&self) -> i32 {
        self.score + self.kongtoupao_score - self.kongtoupao_score_opponent
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    pub fn material_bottom_minus_top(
        placement: &Placement,
        dark: &DarkPieceModel,
        perspective: Side,
    ) -> i32 {
        let dark_value = dark_values(dark, perspective);
        board_squares()
            .map(|square| match placement[square as usize] {
                Cell::Revealed(camp, kind) => camp_sign(camp) * PIECE_VALUES[kind.index()],
                Cell::Dark(camp, _) => {
                    let unassigned = dark_value[camp.index()];
                    camp_sign(camp) * dark_value_at(dark, square, perspective, unassigned)
                }
                Cell::Empty | Cell::Offboard => 0,
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let side = game_state.side_to_move;
        Self::material_bottom_minus_top(&game_state.placement[side.index()], &game_state.dark, side)
    }
}

/// Material, tapered piece-square tables and the empty-head cannon bonus.
#[derive(Debug, Clone)]
pub struct JieqiScorer {
    tables: Arc<ScoreTables>,
    weights: CannonWeights,
}

impl Default for JieqiScorer {
    fn default() -> Self {
        Self::new(Arc::new(ScoreTables::zeroed()))
    }
}

impl JieqiScorer {
    pub fn new(tables: Arc<ScoreTables>) -> Self {
        Self::with_weights(tables, CannonWeights::default())
    }

    pub fn with_weights(tables: Arc<ScoreTables>, weights: CannonWeights) -> Self {
        Self { tables, weights }
    }

    /// Score `placement`, drawn from `perspective`, as bottom minus top.
    pub fn scan(&self, placement: &Placement, dark: &DarkPieceModel, perspective: Side) -> Scan {
        let phase = game_phase(placement);
        let dark_value = dark_values(dark, perspective);

        let mut material = 0;
        let mut opening = 0;
        let mut endgame = 0;
        for square in board_squares() {
            let cell = placement[square as usize];
            let (Some(camp), Some(code)) = (cell.camp(), cell.code()) else {
                continue;
            };
            let value = match cell {
                Cell::Revealed(_, kind) => PIECE_VALUES[kind.index()],
                _ => dark_value_at(dark, square, perspective, dark_value[camp.index()]),
            };
            let own_square = match camp {
                Camp::Bottom => square,
                Camp::Top => reverse(square),
            };
            let (open, end) = self.tables.lookup(code, table_index(own_square));
            let sign = camp_sign(camp);
            material += sign * value;
            opening += sign * open;
            endgame += sign * end;
        }

        let positional = (opening * phase + endgame * (PHASE_MAX - phase)) / PHASE_MAX;
        Scan {
            score: material + positional,
            kongtoupao_score: empty_head_cannon_bonus(placement, Camp::Bottom, self.weights),
            kongtoupao_score_opponent: empty_head_cannon_bonus(placement, Camp::Top, self.weights),
        }
    }

    /// Static evaluation for `perspective`, regardless of who is to move.
    pub fn evaluate(&self, game_state: &GameState, perspective: Side) -> i32 {
        self.scan(
            &game_state.placement[perspective.index()],
            &game_state.dark,
            perspective,
        )
        .total()
    }

    #[inline]
    pub fn red_relative_score(&self, game_state: &GameState) -> i32 {
        self.evaluate(game_state, Side::Red)
    }
}

impl BoardScorer for JieqiScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        self.evaluate(game_state, game_state.side_to_move)
    }
}

/// Remaining heavy and minor material, clamped to [`PHASE_MAX`]. Dark pieces
/// count as mid-weight.
pub fn game_phase(placement: &Placement) -> i32 {
    let phase: i32 = board_squares()
        .map(|square| match placement[square as usize] {
            Cell::Revealed(_, kind) => PHASE_WEIGHTS[kind.index()],
            Cell::Dark(..) => DARK_PHASE_WEIGHT,
            Cell::Empty | Cell::Offboard => 0,
        })
        .sum();
    phase.min(PHASE_MAX)
}

// [camp] -> expected value of that camp's unassigned dark pieces
#[inline]
fn dark_values(dark: &DarkPieceModel, perspective: Side) -> [i32; 2] {
    [
        dark.expected_material(perspective, &PIECE_VALUES),
        dark.expected_material(perspective.opposite(), &PIECE_VALUES),
    ]
}

/// Value of the assumed identity on `square`, else `unassigned`.
#[inline]
fn dark_value_at(
    dark: &DarkPieceModel,
    square: Square,
    perspective: Side,
    unassigned: i32,
) -> i32 {
    let red_square = match perspective {
        Side::Red => square,
        Side::Black => reverse(square),
    };
    dark.assumed_value(red_square).map_or(unassigned, |kind| PIECE_VALUES[kind.index()])
}

#[inline]
fn camp_sign(camp: Camp) -> i32 {
    match camp {
        Camp::Bottom => 1,
        Camp::Top => -1,
    }
}

#[inline]
fn table_index(own_square: Square) -> usize {
    let (row, col) = from_internal(own_square);
    usize::from(row) * usize::from(BOARD_COLS) + usize::from(col)
}
