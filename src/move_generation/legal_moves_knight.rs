use crate::game_state::jieqi_types::*;
use crate::move_generation::legal_move_shared::push_if_enterable;
use crate::moves::piece_deltas::{offset, KNIGHT_JUMPS};

pub fn generate_knight_moves(placement: &Placement, from: Square, out: &mut Vec<Move>) {
    for (jump, leg) in KNIGHT_JUMPS {
        if !placement[offset(from, leg) as usize].is_empty() {
            continue;
        }
        push_if_enterable(placement, from, offset(from, jump), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::pack_move;
    use crate::utils::notation::{empty_placement, to_internal};

    #[test]
    fn blocked_leg_removes_both_jumps_through_it() {
        let mut placement = empty_placement();
        let from = to_internal(4, 4);
        placement[from as usize] = Cell::Revealed(Camp::Bottom, PieceKind::Knight);

        let mut moves = Vec::new();
        generate_knight_moves(&placement, from, &mut moves);
        assert_eq!(moves.len(), 8);

        placement[to_internal(5, 4) as usize] = Cell::Revealed(Camp::Top, PieceKind::Pawn);
        moves.clear();
        generate_knight_moves(&placement, from, &mut moves);
        assert_eq!(moves.len(), 6);
        assert!(!moves.contains(&pack_move(from, to_internal(6, 5))));
    }
}
