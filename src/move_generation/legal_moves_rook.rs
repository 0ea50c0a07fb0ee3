use crate::game_state::jieqi_types::*;
use crate::move_generation::legal_move_shared::is_enterable;
use crate::moves::move_descriptions::pack_move;
use crate::moves::piece_deltas::{offset, ORTHOGONAL};

pub fn generate_rook_moves(placement: &Placement, from: Square, out: &mut Vec<Move>) {
    for delta in ORTHOGONAL {
        let mut to = offset(from, delta);
        loop {
            let cell = placement[to as usize];
            if cell.is_empty() {
                out.push(pack_move(from, to));
                to = offset(to, delta);
                continue;
            }
            if is_enterable(cell) {
                out.push(pack_move(from, to));
            }
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::notation::{empty_placement, to_internal};

    #[test]
    fn rook_stops_at_own_piece_and_captures_enemy() {
        let mut placement = empty_placement();
        let from = to_internal(0, 0);
        placement[from as usize] = Cell::Revealed(Camp::Bottom, PieceKind::Rook);
        placement[to_internal(3, 0) as usize] = Cell::Dark(Camp::Bottom, PieceKind::Pawn);
        placement[to_internal(0, 2) as usize] = Cell::Dark(Camp::Top, PieceKind::Bishop);

        let mut moves = Vec::new();
        generate_rook_moves(&placement, from, &mut moves);
        // two up, one right, one capture
        assert_eq!(moves.len(), 4);
        assert!(moves.contains(&pack_move(from, to_internal(0, 2))));
        assert!(!moves.contains(&pack_move(from, to_internal(3, 0))));
    }
}
