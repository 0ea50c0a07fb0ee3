use crate::game_state::jieqi_rules::in_bottom_palace;
use crate::game_state::jieqi_types::*;
use crate::move_generation::legal_move_shared::push_if_enterable;
use crate::moves::piece_deltas::{offset, DIAGONAL};

/// Revealed advisors step diagonally anywhere; a dark one stays in the palace.
pub fn generate_advisor_moves(placement: &Placement, from: Square, dark: bool, out: &mut Vec<Move>) {
    for delta in DIAGONAL {
        let to = offset(from, delta);
        if dark && !in_palace(placement, to) {
            continue;
        }
        push_if_enterable(placement, from, to, out);
    }
}

#[inline]
fn in_palace(placement: &Placement, square: Square) -> bool {
    placement[square as usize] != Cell::Offboard && in_bottom_palace(square)
}
