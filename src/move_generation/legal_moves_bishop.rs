use crate::game_state::jieqi_rules::crossed_river;
use crate::game_state::jieqi_types::*;
use crate::move_generation::legal_move_shared::push_if_enterable;
use crate::moves::piece_deltas::{offset, BISHOP_JUMPS, DIAGONAL};

/// Revealed bishops roam the whole board; a dark one keeps to its own half.
pub fn generate_bishop_moves(placement: &Placement, from: Square, dark: bool, out: &mut Vec<Move>) {
    for (jump, eye) in BISHOP_JUMPS.into_iter().zip(DIAGONAL) {
        if !placement[offset(from, eye) as usize].is_empty() {
            continue;
        }
        let to = offset(from, jump);
        if dark && placement[to as usize] != Cell::Offboard && crossed_river(to) {
            continue;
        }
        push_if_enterable(placement, from, to, out);
    }
}
