//! Step tables on the padded 16-wide board.
//!
//! A row step is 16 and a column step is 1. Deltas are written for the bottom
//! camp, so "forward" is +16.

/// Rook, cannon and general directions.
pub const ORTHOGONAL: [i16; 4] = [-16, -1, 1, 16];

/// Advisor steps; also the eyes of a bishop jump.
pub const DIAGONAL: [i16; 4] = [-17, -15, 15, 17];

/// Bishop jumps, index-aligned with their eye in [`DIAGONAL`].
pub const BISHOP_JUMPS: [i16; 4] = [-34, -30, 30, 34];

/// Knight jumps paired with the leg square that blocks them.
pub const KNIGHT_JUMPS: [(i16, i16); 8] = [
    (-33, -16),
    (-31, -16),
    (-18, -1),
    (14, -1),
    (-14, 1),
    (18, 1),
    (31, 16),
    (33, 16),
];

/// Squares from which a knight reaches a target, grouped by the eye (the
/// diagonal neighbour of the target) that acts as its leg.
pub const KNIGHT_ATTACKERS: [(i16, [i16; 2]); 4] = [
    (-17, [-33, -18]),
    (-15, [-31, -14]),
    (15, [14, 31]),
    (17, [18, 33]),
];

/// Pawn step before crossing the river.
pub const PAWN_FORWARD: i16 = 16;

/// Pawn steps after crossing the river.
pub const PAWN_CROSSED: [i16; 3] = [16, -1, 1];

/// Offset a square by a delta.
///
/// The padding keeps every single-piece step on the array, so callers only
/// need to check the resulting cell for `Offboard`.
#[inline]
pub const fn offset(square: u8, delta: i16) -> u8 {
    (square as i16 + delta) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::notation::{is_on_board, to_internal};

    #[test]
    fn knight_legs_are_orthogonal_neighbours_of_the_origin() {
        let from = to_internal(4, 4);
        for (jump, leg) in KNIGHT_JUMPS {
            assert!(ORTHOGONAL.contains(&leg));
            assert!(is_on_board(offset(from, jump)));
            // leg lies between origin and destination
            let rest = jump - leg;
            assert!(DIAGONAL.contains(&rest));
        }
    }

    #[test]
    fn knight_attackers_mirror_knight_jumps() {
        for (eye, sources) in KNIGHT_ATTACKERS {
            for source in sources {
                let jump = -source;
                let (_, leg) = KNIGHT_JUMPS
                    .iter()
                    .copied()
                    .find(|(j, _)| *j == jump)
                    .expect("every attacker offset is a knight jump");
                assert_eq!(source + leg, eye);
            }
        }
    }

    #[test]
    fn corner_steps_stay_inside_the_array() {
        let corner = to_internal(0, 0);
        for (jump, _) in KNIGHT_JUMPS {
            let _ = offset(corner, jump);
        }
        assert!(!is_on_board(offset(corner, -16)));
    }
}
