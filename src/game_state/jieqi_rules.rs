//! Canonical Jieqi rule constants.
//!
//! Row 0 is red's back rank. Every piece except the generals starts face-down
//! on its xiangqi start square; the dark marker letter encodes that square's
//! piece, which is how the piece moves until it is revealed.

use crate::game_state::jieqi_types::{PieceCounts, PieceKind, Square};
use crate::utils::notation::{col_of, row_of};

/// Starting layout in external board text, row 0 first.
pub const STARTING_POSITION: &str = concat!(
    "DEFGKGFED",
    ".........",
    ".H.....H.",
    "I.I.I.I.I",
    ".........",
    ".........",
    "i.i.i.i.i",
    ".h.....h.",
    ".........",
    "defgkgfed",
);

/// Full set of one side, generals included.
pub const INITIAL_PIECE_COUNTS: PieceCounts = PieceCounts::from_array([2, 2, 2, 2, 1, 2, 5]);

/// Identities that start face-down for one side (the set minus the general).
pub const INITIAL_CONCEALED_COUNTS: PieceCounts = PieceCounts::from_array([2, 2, 2, 2, 0, 2, 5]);

/// Total of [`INITIAL_CONCEALED_COUNTS`].
pub const CONCEALABLE_TOTAL: u8 = 15;

/// Last row on the bottom camp's own side of the river.
pub const RIVER_LAST_OWN_ROW: u8 = 4;

/// Bottom camp palace: rows 0..=2, columns 3..=5.
#[inline]
pub fn in_bottom_palace(square: Square) -> bool {
    row_of(square) <= 2 && (3..=5).contains(&col_of(square))
}

/// Whether a bottom-camp piece on `square` stands across the river.
#[inline]
pub fn crossed_river(square: Square) -> bool {
    row_of(square) > RIVER_LAST_OWN_ROW
}

/// Piece for which `square` is a start square on the bottom side, if any.
pub fn start_square_kind(square: Square) -> Option<PieceKind> {
    let row = row_of(square);
    let col = col_of(square);
    match (row, col) {
        (0, 0) | (0, 8) => Some(PieceKind::Rook),
        (0, 1) | (0, 7) => Some(PieceKind::Knight),
        (0, 2) | (0, 6) => Some(PieceKind::Bishop),
        (0, 3) | (0, 5) => Some(PieceKind::Advisor),
        (0, 4) => Some(PieceKind::King),
        (2, 1) | (2, 7) => Some(PieceKind::Cannon),
        (3, 0) | (3, 2) | (3, 4) | (3, 6) | (3, 8) => Some(PieceKind::Pawn),
        _ => None,
    }
}
