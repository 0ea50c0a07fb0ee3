//! Zobrist hashing for position identity and repetition tracking.
//!
//! Keys are generated from a fixed seed so hashes are deterministic across
//! runs. Squares are always red-perspective squares and sides are absolute,
//! so the same position hashes identically whichever perspective produced it.
//! Dark pieces hash by their marker, never by an assumed identity.

use std::sync::OnceLock;

use crate::game_state::jieqi_types::*;
use crate::utils::notation::{board_squares, reverse};

#[derive(Debug)]
struct ZobristTables {
    cell_square: [[[u64; BOARD_CELLS]; CELL_CODE_COUNT]; 2],
    side_to_move: u64,
}

static TABLES: OnceLock<Box<ZobristTables>> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> Box<ZobristTables> {
    let mut seed: u64 = 0x6A09_E667_F3BC_C908;

    let mut cell_square = [[[0u64; BOARD_CELLS]; CELL_CODE_COUNT]; 2];
    for side in &mut cell_square {
        for code in side {
            for sq in code {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    Box::new(ZobristTables {
        cell_square,
        side_to_move,
    })
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Key term for an occupied cell owned by `side` on `red_square`.
///
/// Empty and offboard cells contribute nothing.
#[inline]
pub fn cell_key(side: Side, cell: Cell, red_square: Square) -> u64 {
    match cell.code() {
        Some(code) => tables().cell_square[side.index()][code][red_square as usize],
        None => 0,
    }
}

/// Key term for a cell read from `perspective`'s placement at `square`.
#[inline]
pub fn perspective_cell_key(perspective: Side, cell: Cell, square: Square) -> u64 {
    let Some(camp) = cell.camp() else {
        return 0;
    };
    let red_square = match perspective {
        Side::Red => square,
        Side::Black => reverse(square),
    };
    cell_key(camp.side_from(perspective), cell, red_square)
}

/// Side-to-move toggle (xored in when black is to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Full recomputation from the red-perspective placement.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let red = &game_state.placement[Side::Red.index()];
    let mut key = 0u64;
    for square in board_squares() {
        key ^= perspective_cell_key(Side::Red, red[square as usize], square);
    }
    if game_state.side_to_move == Side::Black {
        key ^= side_to_move_key();
    }
    key
}
