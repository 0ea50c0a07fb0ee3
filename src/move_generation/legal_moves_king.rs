use crate::game_state::jieqi_rules::in_bottom_palace;
use crate::game_state::jieqi_types::*;
use crate::move_generation::legal_move_shared::push_if_enterable;
use crate::moves::move_descriptions::pack_move;
use crate::moves::piece_deltas::{offset, ORTHOGONAL};

/// Palace steps plus the flying-general capture up an open file.
pub fn generate_king_moves(placement: &Placement, from: Square, out: &mut Vec<Move>) {
    for delta in ORTHOGONAL {
        let to = offset(from, delta);
        if placement[to as usize] == Cell::Offboard || !in_bottom_palace(to) {
            continue;
        }
        push_if_enterable(placement, from, to, out);
    }

    let mut to = offset(from, 16);
    while placement[to as usize].is_empty() {
        to = offset(to, 16);
    }
    if placement[to as usize] == Cell::Revealed(Camp::Top, PieceKind::King) {
        out.push(pack_move(from, to));
    }
}
