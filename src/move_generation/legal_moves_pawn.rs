use crate::game_state::jieqi_rules::crossed_river;
use crate::game_state::jieqi_types::*;
use crate::move_generation::legal_move_shared::push_if_enterable;
use crate::moves::piece_deltas::{offset, PAWN_CROSSED, PAWN_FORWARD};

pub fn generate_pawn_moves(placement: &Placement, from: Square, out: &mut Vec<Move>) {
    if crossed_river(from) {
        for delta in PAWN_CROSSED {
            push_if_enterable(placement, from, offset(from, delta), out);
        }
    } else {
        push_if_enterable(placement, from, offset(from, PAWN_FORWARD), out);
    }
}
