//! Empty-head cannon ("kong tou pao") detection.
//!
//! A cannon that faces the enemy general along a file or rank with only empty
//! squares between them pins the general's defenders: any piece that steps in
//! becomes a screen and gives check.

use crate::game_state::jieqi_types::*;
use crate::move_generation::legal_move_shared::find_general;
use crate::moves::piece_deltas::{offset, ORTHOGONAL};

/// Bonus per empty-head cannon, by the line it shares with the general.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannonWeights {
    pub file: i32,
    pub rank: i32,
}

impl Default for CannonWeights {
    fn default() -> Self {
        Self { file: 90, rank: 45 }
    }
}

/// Bonus earned by `attacker`'s cannons against the other camp's general.
///
/// Dark pieces on a cannon start square count as cannons since that is how
/// they move.
pub fn empty_head_cannon_bonus(placement: &Placement, attacker: Camp, weights: CannonWeights) -> i32 {
    let Some(general) = find_general(placement, attacker.opposite()) else {
        return 0;
    };

    let mut bonus = 0;
    for delta in ORTHOGONAL {
        let mut square = offset(general, delta);
        let mut gap = 0;
        while placement[square as usize].is_empty() {
            gap += 1;
            square = offset(square, delta);
        }
        if gap > 0 && placement[square as usize].moves_as(attacker, PieceKind::Cannon) {
            bonus += if delta.abs() == 16 {
                weights.file
            } else {
                weights.rank
            };
        }
    }
    bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::jieqi_rules::STARTING_POSITION;
    use crate::utils::board_text::parse_external_cells;
    use crate::utils::notation::{empty_placement, to_internal};

    fn board_with_top_general() -> Placement {
        let mut placement = empty_placement();
        placement[to_internal(9, 4) as usize] = Cell::Revealed(Camp::Top, PieceKind::King);
        placement
    }

    #[test]
    fn cannon_on_open_file_scores_the_file_weight() {
        let mut placement = board_with_top_general();
        placement[to_internal(2, 4) as usize] = Cell::Revealed(Camp::Bottom, PieceKind::Cannon);
        let weights = CannonWeights::default();
        assert_eq!(empty_head_cannon_bonus(&placement, Camp::Bottom, weights), weights.file);
        assert_eq!(empty_head_cannon_bonus(&placement, Camp::Top, weights), 0);
    }

    #[test]
    fn dark_cannon_marker_on_the_rank_counts() {
        let mut placement = board_with_top_general();
        placement[to_internal(9, 1) as usize] = Cell::Dark(Camp::Bottom, PieceKind::Cannon);
        let weights = CannonWeights { file: 10, rank: 3 };
        assert_eq!(empty_head_cannon_bonus(&placement, Camp::Bottom, weights), 3);
    }

    #[test]
    fn blocked_or_adjacent_cannon_does_not_count() {
        let mut placement = board_with_top_general();
        placement[to_internal(2, 4) as usize] = Cell::Revealed(Camp::Bottom, PieceKind::Cannon);
        placement[to_internal(5, 4) as usize] = Cell::Revealed(Camp::Top, PieceKind::Pawn);
        placement[to_internal(9, 5) as usize] = Cell::Revealed(Camp::Bottom, PieceKind::Cannon);
        assert_eq!(
            empty_head_cannon_bonus(&placement, Camp::Bottom, CannonWeights::default()),
            0
        );
    }

    #[test]
    fn opening_has_no_empty_head_cannon() {
        let placement = parse_external_cells(STARTING_POSITION.as_bytes()).expect("valid");
        for camp in [Camp::Bottom, Camp::Top] {
            assert_eq!(
                empty_head_cannon_bonus(&placement, camp, CannonWeights::default()),
                0
            );
        }
    }
}
